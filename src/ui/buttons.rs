//! Button input tasks.
//!
//! Four buttons (MENU, PLAY, UP, DOWN) share one ADC channel through a
//! resistor ladder; a polling task samples the channel, runs the
//! debouncing decoder, and sends confirmed presses to the UI channel.
//! The BOOT button is a plain active-low GPIO on its own task.

use crate::config::BUTTON_POLL_MS;
use crate::ui::input::{counts_to_mv, LadderDecoder};
use crate::ui::ButtonEvent;
use defmt::info;
use embassy_stm32::adc::Adc;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::peripherals::{ADC1, PA1};
use embassy_stm32::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};

/// Sample the button ladder and report debounced single clicks.
#[embassy_executor::task]
pub async fn ladder_task(
    mut adc: Adc<'static, ADC1>,
    mut pin: Peri<'static, PA1>,
    tx: Sender<'static, CriticalSectionRawMutex, ButtonEvent, 4>,
) -> ! {
    let mut decoder = LadderDecoder::new();

    loop {
        let counts = adc.blocking_read(&mut pin);
        if let Some(event) = decoder.sample(counts_to_mv(counts)) {
            info!("Button: {}", event);
            // The camera variant has no receiver; drop on full rather
            // than stall the sampler.
            let _ = tx.try_send(event);
        }
        Timer::after(Duration::from_millis(BUTTON_POLL_MS)).await;
    }
}

/// Watch the BOOT button. It has no menu role; presses are only
/// logged, matching the ladder buttons' single-click event class.
#[embassy_executor::task]
pub async fn boot_button_task(mut btn: ExtiInput<'static>) -> ! {
    loop {
        btn.wait_for_falling_edge().await;
        info!("Boot button pressed");
        btn.wait_for_rising_edge().await;
    }
}
