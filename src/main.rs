//! qrpod firmware entry point.
//!
//! Board bring-up (SPI LCD, ADC button ladder, SCCB + DCMI camera),
//! then one of two app variants:
//!
//! - default: transient greeting, then the camera preview loop
//! - `menu-demo` feature: the single-level menu with placeholder pages

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use panic_probe as _;

use display_interface_spi::SPIInterface;
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7735s;
use mipidsi::options::{Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;

use qrpod::config;
use qrpod::ui::buttons;
use qrpod::ui::display::Screen;
use qrpod::ui::ButtonEvent;

#[cfg(not(feature = "menu-demo"))]
use {
    defmt::error,
    embassy_stm32::bind_interrupts,
    embassy_stm32::dcmi::{self, Dcmi},
    embassy_stm32::i2c::I2c,
    embassy_stm32::peripherals,
    embassy_stm32::rcc::{Mco, Mco1Source, McoPrescaler},
    embassy_time::{Duration, Timer},
    qrpod::camera::ov9655::Ov9655,
    qrpod::camera::preview::Preview,
    qrpod::camera::{Camera, CameraConfig, PixelFormat},
};

#[cfg(feature = "menu-demo")]
use {
    embedded_graphics::pixelcolor::Rgb565,
    embedded_graphics::prelude::DrawTarget,
    qrpod::ui::menu::{MenuAction, MenuState, PageId, MAIN_MENU},
};

/// Concrete panel stack: blocking SPI1 → ST7735.
type LcdSpi = ExclusiveDevice<Spi<'static, embassy_stm32::mode::Blocking>, Output<'static>, NoDelay>;
type Lcd = mipidsi::Display<SPIInterface<LcdSpi, Output<'static>>, ST7735s, Output<'static>>;
type Panel = Screen<Lcd>;

/// Debounced button presses, ladder task → UI.
static BUTTONS: Channel<CriticalSectionRawMutex, ButtonEvent, 4> = Channel::new();

/// The shared display. Menu renderer and preview loop both go through
/// this mutex; the guard is the display-access scope.
static SCREEN: StaticCell<Mutex<CriticalSectionRawMutex, Panel>> = StaticCell::new();

#[cfg(not(feature = "menu-demo"))]
bind_interrupts!(struct Irqs {
    DCMI => dcmi::InterruptHandler<peripherals::DCMI>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());
    info!("qrpod {} starting", env!("CARGO_PKG_VERSION"));

    // LCD panel.
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(config::LCD_SPI_HZ);
    let lcd_spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config);
    let lcd_cs = Output::new(p.PD6, Level::High, Speed::VeryHigh);
    let lcd_dc = Output::new(p.PD7, Level::Low, Speed::VeryHigh);
    let lcd_rst = Output::new(p.PD5, Level::High, Speed::VeryHigh);
    let lcd_bus = unwrap!(ExclusiveDevice::new_no_delay(lcd_spi, lcd_cs).ok());
    let lcd = match Builder::new(ST7735s, SPIInterface::new(lcd_bus, lcd_dc))
        .reset_pin(lcd_rst)
        .display_size(config::DISPLAY_WIDTH, config::DISPLAY_HEIGHT)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
    {
        Ok(lcd) => lcd,
        Err(_) => defmt::panic!("LCD init failed"),
    };

    // Backlight full on once the panel is usable; held for the life of
    // the process.
    let _backlight = Output::new(p.PD4, Level::High, Speed::Low);

    let screen: &'static Mutex<CriticalSectionRawMutex, Panel> =
        SCREEN.init(Mutex::new(Screen::new(lcd)));

    // Buttons.
    let adc = Adc::new(p.ADC1);
    unwrap!(spawner.spawn(buttons::ladder_task(adc, p.PA1, BUTTONS.sender())));
    let boot = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);
    unwrap!(spawner.spawn(buttons::boot_button_task(boot)));

    #[cfg(feature = "menu-demo")]
    menu_app(screen).await;

    #[cfg(not(feature = "menu-demo"))]
    {
        // Transient greeting while the camera comes up.
        screen.lock().await.draw_banner("qrpod");
        Timer::after(Duration::from_millis(config::GREETING_MS)).await;

        // Camera: SCCB for configuration, MCO1 as the sensor clock,
        // DCMI + DMA for capture.
        let sccb = I2c::new_blocking(
            p.I2C2,
            p.PB10,
            p.PB11,
            Hertz(config::SCCB_HZ),
            Default::default(),
        );
        let _xclk = Mco::new(p.MCO1, p.PA8, Mco1Source::HSI, McoPrescaler::DIV1);
        let dcmi = Dcmi::new_8bit(
            p.DCMI,
            p.DMA2_CH1,
            Irqs,
            p.PC6, // D0
            p.PC7, // D1
            p.PE0, // D2
            p.PE1, // D3
            p.PE4, // D4
            p.PB6, // D5
            p.PE5, // D6
            p.PE6, // D7
            p.PB7, // VSYNC
            p.PA4, // HSYNC
            p.PA6, // PIXCLK
            dcmi::Config::default(),
        );

        // Capture DMA buffer. Word-typed for the DCMI engine; must
        // live outside CCM RAM, which DMA2 cannot reach.
        static CAPTURE_WORDS: StaticCell<[u32; config::PREVIEW_FRAME_BYTES / 4]> =
            StaticCell::new();
        let words = CAPTURE_WORDS.init([0u32; config::PREVIEW_FRAME_BYTES / 4]);

        let mut camera = Ov9655::new(sccb, dcmi, words);
        let cam_config = CameraConfig {
            width: config::PREVIEW_WIDTH,
            height: config::PREVIEW_HEIGHT,
            format: PixelFormat::Rgb565,
        };
        if let Err(err) = camera.init(&cam_config).await {
            error!("camera init failed: {}", err);
            defmt::panic!("cannot start without camera");
        }
        if let Err(err) = camera
            .set_orientation(config::SENSOR_VFLIP, config::SENSOR_HMIRROR)
            .await
        {
            // Worst case the picture is flipped; keep going.
            error!("sensor orientation setup failed: {}", err);
        }

        // The preview frame buffer, allocated exactly once.
        static FRAME_BUF: StaticCell<[u8; config::PREVIEW_FRAME_BYTES]> = StaticCell::new();
        let frame_buf = FRAME_BUF.init([0u8; config::PREVIEW_FRAME_BYTES]);

        screen.lock().await.clear();
        info!("entering capture-display loop");
        let mut preview = Preview::new(camera, frame_buf, config::PREVIEW_SWAP_BYTES);
        preview.run(screen, |_| true).await;
        // run() only returns when its condition fails; |_| true never does.
        defmt::unreachable!();
    }
}

/// Menu variant: draw the menu, then dispatch button presses forever.
#[cfg(feature = "menu-demo")]
async fn menu_app(screen: &'static Mutex<CriticalSectionRawMutex, Panel>) -> ! {
    let mut menu = MenuState::new(MAIN_MENU);
    screen.lock().await.draw_menu(&menu);

    loop {
        let event = BUTTONS.receive().await;
        match menu.dispatch(event) {
            Some(MenuAction::Redraw) => screen.lock().await.draw_menu(&menu),
            Some(MenuAction::Activate(page)) => {
                let mut panel = screen.lock().await;
                run_page(&mut panel, page);
            }
            None => {}
        }
    }
}

/// Placeholder pages; real QR generation / scanning hang off these.
/// Pages own the whole screen and start by clearing it (the banner
/// draws do).
#[cfg(feature = "menu-demo")]
fn run_page<D: DrawTarget<Color = Rgb565>>(panel: &mut Screen<D>, page: PageId) {
    match page {
        PageId::QrGenerate => panel.draw_banner("qr generate"),
        PageId::QrScan => panel.draw_banner("qr scan"),
    }
}
