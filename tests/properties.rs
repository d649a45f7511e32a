//! Property tests for the transition rules.

use proptest::prelude::*;
use shiftreg::{Bit, LoadShift, Mode, ShiftRegisterSimulator, Transition};

fn bit_string(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('0'), Just('1')], 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn to_bits(s: &str) -> Vec<Bit> {
    s.chars().map(|c| Bit::from(c == '1')).collect()
}

proptest! {
    /// Pulse k puts s[k-1] into Q1, and QN read before a pulse is the bit
    /// that entered `width` pulses earlier (zeros once the string runs out).
    #[test]
    fn serial_modes_shift_the_whole_string(
        width in 1usize..=8,
        input in bit_string(12),
        serial_mode in prop_oneof![Just(Mode::Siso), Just(Mode::Sipo)],
        extra in 0usize..=8,
    ) {
        let mut sim = ShiftRegisterSimulator::new(serial_mode, width).unwrap();
        sim.set_serial_string(&input).unwrap();
        let bits = to_bits(&input);

        let mut emitted = Vec::new();
        for k in 0..bits.len() + extra {
            emitted.push(sim.register().serial_out());
            sim.pulse();
            let expected_q1 = bits.get(k).copied().unwrap_or(Bit::Zero);
            prop_assert_eq!(sim.register().get(0), Some(expected_q1));
            prop_assert_eq!(sim.width(), width);
        }

        // Register after len(s) + extra pulses is the tail of (s ++ zeros), newest first
        let mut stream = bits.clone();
        stream.extend(std::iter::repeat(Bit::Zero).take(extra));
        let mut expected = vec![Bit::Zero; width];
        for &b in &stream {
            expected.pop();
            expected.insert(0, b);
        }
        prop_assert_eq!(sim.register().bits(), &expected[..]);

        // Serial out seen before pulse j is the bit that entered at pulse j - width
        for (j, out) in emitted.iter().enumerate() {
            let want = if j >= width {
                stream.get(j - width).copied().unwrap_or(Bit::Zero)
            } else {
                Bit::Zero
            };
            prop_assert_eq!(*out, want);
        }
    }

    /// PIPO has no history: every pulse latches the current input.
    #[test]
    fn pipo_latches_current_input(
        width in 1usize..=8,
        words in proptest::collection::vec(any::<u16>(), 1..6),
    ) {
        let mut sim = ShiftRegisterSimulator::new(Mode::Pipo, width).unwrap();
        for word in words {
            let text: String = (0..width)
                .map(|i| if word >> i & 1 == 1 { '1' } else { '0' })
                .collect();
            sim.set_parallel_word(&text).unwrap();
            sim.pulse();
            prop_assert_eq!(sim.register().bits(), &to_bits(&text)[..]);
            let once = sim.snapshot().q;
            sim.pulse();
            prop_assert_eq!(sim.snapshot().q, once);
        }
    }

    /// PISO loads exactly once and shifts forever after.
    #[test]
    fn piso_loads_once(
        width in 1usize..=8,
        word in any::<u8>(),
        serial in proptest::collection::vec(0u8..=1, 0..12),
    ) {
        let mut sim = ShiftRegisterSimulator::new(Mode::Piso, width).unwrap();
        for i in 0..width {
            sim.set_parallel_bit(i, (word >> (i % 8)) & 1).unwrap();
        }
        let loaded = sim.parallel_input().to_vec();

        let first = sim.pulse();
        prop_assert!(
            matches!(first, Transition::Loaded { .. }),
            "first PISO pulse was {:?}", first
        );
        prop_assert_eq!(sim.register().bits(), &loaded[..]);

        let mut expected = loaded;
        for bit in serial {
            sim.set_serial_bit(bit).unwrap();
            // Changing the parallel lines has no effect any more
            sim.set_parallel_bit(0, 1 - bit).unwrap();
            let transition = sim.pulse();
            let incoming = Bit::from(bit == 1);
            let outgoing = expected.pop().unwrap();
            expected.insert(0, incoming);
            prop_assert_eq!(transition, Transition::Shifted { incoming, outgoing });
            prop_assert_eq!(sim.register().bits(), &expected[..]);
            prop_assert_eq!(sim.load_shift(), LoadShift::Shift);
        }
    }

    /// Non-binary strings never change state.
    #[test]
    fn rejected_serial_strings_are_atomic(
        prefix in bit_string(4),
        junk in "[2-9a-z ]{1,3}",
    ) {
        let mut sim = ShiftRegisterSimulator::new(Mode::Siso, 4).unwrap();
        sim.set_serial_string("11").unwrap();
        sim.pulse();
        let before = sim.snapshot();
        let bad = format!("{}{}", prefix, junk.trim_end());
        prop_assume!(bad.chars().any(|c| c != '0' && c != '1'));
        prop_assert!(sim.set_serial_string(&bad).is_err());
        prop_assert_eq!(sim.snapshot(), before);
    }
}
