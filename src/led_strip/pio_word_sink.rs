//! A [`WordSink`] that drives a WS2812 chain from a PIO state machine.
//!
//! The PIO program is the usual three-phase WS2812 encoder, but the output shift
//! register autopulls every 8 bits instead of every 24, so each FIFO push carries
//! exactly one channel. Channel order is therefore decided entirely by the caller.

use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use fixed::types::U24F8;

use super::WordSink;

/// Cycles the line is low before a bit starts (stop phase).
const T1: u8 = 2;
/// Cycles the line is high for a `0` bit, or the extra high time for a `1` bit.
const T2: u8 = 5;
/// Cycles the line is low at the end of a `0` bit.
const T3: u8 = 3;
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;

/// Bit rate of the single-wire protocol, in kHz.
const BIT_RATE_KHZ: u32 = 800;

/// Bits per FIFO word.
const WORD_BITS: u8 = 8;

/// The WS2812 encoder program, loaded once into a PIO block's instruction memory.
pub struct Ws2812WordProgram<'d, PIO: Instance> {
    program: LoadedProgram<'d, PIO>,
}

impl<'d, PIO: Instance> Ws2812WordProgram<'d, PIO> {
    /// Assemble and load the encoder.
    pub fn new(common: &mut Common<'d, PIO>) -> Self {
        let side_set = pio::SideSet::new(false, 1, false);
        let mut assembler: pio::Assembler<32> = pio::Assembler::new_with_side_set(side_set);

        let mut wrap_target = assembler.label();
        let mut wrap_source = assembler.label();
        let mut do_zero = assembler.label();
        assembler.set_with_side_set(pio::SetDestination::PINDIRS, 1, 0);
        assembler.bind(&mut wrap_target);
        // stop bit
        assembler.out_with_delay_and_side_set(pio::OutDestination::X, 1, T3 - 1, 0);
        // start bit
        assembler.jmp_with_delay_and_side_set(pio::JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);
        // data bit = 1
        assembler.jmp_with_delay_and_side_set(pio::JmpCondition::Always, &mut wrap_target, T2 - 1, 1);
        assembler.bind(&mut do_zero);
        // data bit = 0
        assembler.nop_with_delay_and_side_set(T2 - 1, 0);
        assembler.bind(&mut wrap_source);

        let program = assembler.assemble_with_wrap(wrap_source, wrap_target);
        Self {
            program: common.load_program(&program),
        }
    }
}

/// One PIO state machine emitting the WS2812 waveform, one byte per word.
pub struct PioWordSink<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioWordSink<'d, PIO, SM> {
    /// Configure `sm` to run `program` on `pin` at 800 kHz and start it.
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
        program: &Ws2812WordProgram<'d, PIO>,
    ) -> Self {
        let mut config = Config::default();
        let out_pin = common.make_pio_pin(pin);
        config.set_out_pins(&[&out_pin]);
        config.set_set_pins(&[&out_pin]);
        config.use_program(&program.program, &[&out_pin]);

        let clock_khz = U24F8::from_num(clk_sys_freq() / 1000);
        let bit_khz = U24F8::from_num(BIT_RATE_KHZ) * CYCLES_PER_BIT;
        config.clock_divider = clock_khz / bit_khz;

        config.fifo_join = FifoJoin::TxOnly;
        config.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: WORD_BITS,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&config);
        sm.set_enable(true);
        debug!("PioWordSink: state machine {} enabled", SM);

        Self { sm }
    }
}

impl<PIO: Instance, const SM: usize> WordSink for PioWordSink<'_, PIO, SM> {
    async fn write_word(&mut self, word: u8) {
        // Left shift: the word must sit in the top byte of the 32-bit FIFO entry.
        self.sm.tx().wait_push(u32::from(word) << 24).await;
    }
}
