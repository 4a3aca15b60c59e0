#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{self, Pio};
use embassy_time::{Delay, Instant};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use simon_matrix::button::{Button, PressedTo};
use simon_matrix::config::SimonConfig;
use simon_matrix::joystick::adc_axes::AdcAxes;
use simon_matrix::joystick::{Joystick, JoystickConfig};
use simon_matrix::led_strip::pio_word_sink::{PioWordSink, Ws2812WordProgram};
use simon_matrix::simon::Simon;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    // Matrix data on GPIO7.
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = Ws2812WordProgram::new(&mut common);
    let sink = PioWordSink::new(&mut common, sm0, p.PIN_7, &program);

    // Stick: x on GPIO27 (ADC1), y on GPIO26 (ADC0), switch on GPIO22 to ground.
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let axes = AdcAxes::new(adc, p.PIN_27, p.PIN_26);
    let confirm = Button::from_pin(p.PIN_22, PressedTo::Ground);
    let joystick = Joystick::new(axes, confirm, JoystickConfig::DEFAULT);

    let rng = SmallRng::seed_from_u64(Instant::now().as_ticks());
    defmt::info!("simon_joystick: starting");

    let mut simon = Simon::new(sink, joystick, Delay, rng, SimonConfig::DEFAULT);
    simon.run().await
}
