#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::State;
use embassy_usb::{Builder, Config as UsbConfig};
use serial_to_dspad::{
    configure_usb_serial, BoardPins, PadBridge, UsbCommandSource, UsbReportSink,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// CDC-ACM state.
static CDC_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("serial-to-dspad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust DS Pad");
    usb_config.product = Some("Serial Pad Bridge");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;
    // Required for CDC on Windows hosts.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );

    // Configure the CDC-ACM serial function
    let cdc_state = CDC_STATE.init(State::new());
    let cdc = configure_usb_serial(&mut builder, cdc_state);

    // Build the USB device
    let mut usb_device = builder.build();

    let (tx, rx) = cdc.split();
    let source = UsbCommandSource::new(rx);
    let sink = UsbReportSink::new(tx);

    // --- GPIO Setup ---
    // Protocol pins 0..=21 on GPIO0..=21 (GPIO17 stays with the board);
    // the mode indicator starts High, as Normal mode is the power-on state.
    let bank = BoardPins::new(
        [
            Flex::new(p.PIN_0),
            Flex::new(p.PIN_1),
            Flex::new(p.PIN_2),
            Flex::new(p.PIN_3),
            Flex::new(p.PIN_4),
            Flex::new(p.PIN_5),
            Flex::new(p.PIN_6),
            Flex::new(p.PIN_7),
            Flex::new(p.PIN_8),
            Flex::new(p.PIN_9),
            Flex::new(p.PIN_10),
            Flex::new(p.PIN_11),
            Flex::new(p.PIN_12),
            Flex::new(p.PIN_13),
            Flex::new(p.PIN_14),
            Flex::new(p.PIN_15),
            Flex::new(p.PIN_16),
            Flex::new(p.PIN_18),
            Flex::new(p.PIN_19),
            Flex::new(p.PIN_20),
            Flex::new(p.PIN_21),
        ],
        Output::new(p.PIN_25, Level::High),
    );

    // Brings the bank up in Normal mode.
    let mut bridge = PadBridge::new(source, sink, bank);

    info!("serial-to-dspad initialized, waiting for host commands...");

    let usb_fut = usb_device.run();
    let bridge_fut = async {
        loop {
            if let Err(e) = bridge.step().await {
                warn!("bridge iteration error: {:?}", e);
            }
        }
    };

    join(usb_fut, bridge_fut).await;
}
