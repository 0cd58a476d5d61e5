//! Text-to-program generation
//!
//! [`text_to_program`] builds a program that prints a given text using a
//! single cell. For each byte it emits the shorter of the `+` run or the `-`
//! run (wrapping around 256) from the previous byte value, then `.`.

/// Build a program whose output is exactly `text`
pub fn text_to_program(text: &[u8]) -> String {
    let mut program = String::new();
    let mut previous: u8 = 0;

    for &byte in text {
        let up = byte.wrapping_sub(previous) as usize;
        if up <= 128 {
            program.extend(std::iter::repeat('+').take(up));
        } else {
            program.extend(std::iter::repeat('-').take(256 - up));
        }
        program.push('.');
        previous = byte;
    }

    program
}
