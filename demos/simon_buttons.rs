#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{self, Pio};
use embassy_time::{Delay, Instant};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use simon_matrix::button::{BUTTON_LEDS_DEFAULT, Button, ButtonPad, PressedTo};
use simon_matrix::config::SimonConfig;
use simon_matrix::led_strip::pio_word_sink::{PioWordSink, Ws2812WordProgram};
use simon_matrix::simon::Simon;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = Ws2812WordProgram::new(&mut common);
    let sink = PioWordSink::new(&mut common, sm0, p.PIN_7, &program);

    // One button per corner, in reading order: top-left, top-right, bottom-left, bottom-right.
    // Buttons wire to GND (Pico 2 erratum E9 makes pull-downs unreliable).
    let buttons = [
        Button::from_pin(p.PIN_2, PressedTo::Ground),
        Button::from_pin(p.PIN_3, PressedTo::Ground),
        Button::from_pin(p.PIN_4, PressedTo::Ground),
        Button::from_pin(p.PIN_5, PressedTo::Ground),
    ];
    let pad = ButtonPad::new(buttons, BUTTON_LEDS_DEFAULT);

    let rng = SmallRng::seed_from_u64(Instant::now().as_ticks());
    defmt::info!("simon_buttons: starting");

    let mut simon = Simon::new(sink, pad, Delay, rng, SimonConfig::DEFAULT);
    simon.run().await
}
