// Behavioral Machine Model Tests

#[cfg(test)]
mod tests {
    use crate::instruction::{Label, Line, MemRef, Op};
    use crate::machine::Machine;
    use test_log::test;

    const CELL: MemRef = MemRef::Addr(0);

    fn stream(ops: &[Op]) -> Vec<Line> {
        ops.iter().copied().map(Line::op).collect()
    }

    #[test]
    fn test_load_store_roundtrip() {
        let mut machine = Machine::new();
        machine
            .run(&stream(&[
                Op::EntA(42),
                Op::StA(CELL),
                Op::EntA(0),
                Op::LdA(CELL),
                Op::End(2000),
            ]))
            .unwrap();

        assert_eq!(machine.acc, 42);
        assert_eq!(machine.read(CELL), 42);
    }

    #[test]
    fn test_add_and_sub_work_against_a_cell() {
        let mut machine = Machine::new();
        machine
            .run(&stream(&[
                Op::EntA(10),
                Op::StA(CELL),
                Op::EntA(3),
                Op::Add(CELL),
                Op::Sub(CELL),
                Op::End(2000),
            ]))
            .unwrap();

        assert_eq!(machine.acc, 3);
    }

    #[test]
    fn test_mul_leaves_low_half_in_index() {
        let mut machine = Machine::new();
        machine
            .run(&stream(&[
                Op::EntA(6),
                Op::StA(CELL),
                Op::EntA(7),
                Op::Mul(CELL),
                Op::End(2000),
            ]))
            .unwrap();

        assert_eq!(machine.acc, 0);
        assert_eq!(machine.index, 42);
    }

    #[test]
    fn test_div_divides_index_by_cell() {
        let mut machine = Machine::new();
        machine
            .run(&stream(&[
                Op::EntA(2),
                Op::StA(CELL),
                Op::EntX(7),
                Op::EntA(0),
                Op::Div(CELL),
                Op::End(2000),
            ]))
            .unwrap();

        assert_eq!(machine.acc, 3);
        assert_eq!(machine.index, 1);
    }

    #[test]
    fn test_div_with_nonzero_accumulator_overflows() {
        let mut machine = Machine::new();
        let result = machine.run(&stream(&[
            Op::EntA(2),
            Op::StA(CELL),
            Op::EntX(7),
            Op::EntA(1),
            Op::Div(CELL),
            Op::End(2000),
        ]));

        assert!(result.unwrap_err().contains("overflow"));
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let mut machine = Machine::new();
        let result = machine.run(&stream(&[
            Op::EntX(7),
            Op::EntA(0),
            Op::Div(CELL),
            Op::End(2000),
        ]));

        assert!(result.unwrap_err().contains("zero"));
    }

    #[test]
    fn test_jl_follows_the_comparison_indicator() {
        // 1 < 2, so the jump is taken and the store is skipped.
        let lines = vec![
            Line::op(Op::EntA(2)),
            Line::op(Op::StA(CELL)),
            Line::op(Op::EntA(1)),
            Line::op(Op::CmpA(CELL)),
            Line::op(Op::Jl(Label::Then(0))),
            Line::op(Op::EntA(99)),
            Line::op(Op::StA(MemRef::Addr(1))),
            Line::anchor(Label::Then(0)),
            Line::op(Op::End(2000)),
        ];

        let mut machine = Machine::new();
        machine.run(&lines).unwrap();
        assert_eq!(machine.read(MemRef::Addr(1)), 0);
    }

    #[test]
    fn test_je_not_taken_falls_through() {
        let lines = vec![
            Line::op(Op::EntA(2)),
            Line::op(Op::StA(CELL)),
            Line::op(Op::EntA(1)),
            Line::op(Op::CmpA(CELL)),
            Line::op(Op::Je(Label::Then(0))),
            Line::op(Op::EntA(99)),
            Line::op(Op::StA(MemRef::Addr(1))),
            Line::anchor(Label::Then(0)),
            Line::op(Op::End(2000)),
        ];

        let mut machine = Machine::new();
        machine.run(&lines).unwrap();
        assert_eq!(machine.read(MemRef::Addr(1)), 99);
    }

    #[test]
    fn test_conditional_jump_requires_a_prior_comparison() {
        let lines = vec![
            Line::op(Op::Jl(Label::Then(0))),
            Line::anchor(Label::Then(0)),
            Line::op(Op::End(2000)),
        ];

        let mut machine = Machine::new();
        let result = machine.run(&lines);
        assert!(result.unwrap_err().contains("before any comparison"));
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let lines = vec![
            Line::anchor(Label::Then(0)),
            Line::anchor(Label::Then(0)),
            Line::op(Op::End(2000)),
        ];

        let mut machine = Machine::new();
        let result = machine.run(&lines);
        assert!(result.unwrap_err().contains("duplicate label"));
    }

    #[test]
    fn test_jump_to_undefined_label_is_rejected() {
        let lines = vec![Line::op(Op::Jmp(Label::Repeat(9))), Line::op(Op::End(2000))];

        let mut machine = Machine::new();
        let result = machine.run(&lines);
        assert!(result.unwrap_err().contains("undefined label"));
    }

    #[test]
    fn test_input_and_output_devices() {
        let mut machine = Machine::new();
        machine.feed_input(&[5, 9]);
        machine
            .run(&stream(&[
                Op::In,
                Op::StA(CELL),
                Op::Out(CELL),
                Op::In,
                Op::StA(CELL),
                Op::Out(CELL),
                Op::End(2000),
            ]))
            .unwrap();

        assert_eq!(machine.output(), &[5, 9]);
    }

    #[test]
    fn test_empty_input_queue_is_an_error() {
        let mut machine = Machine::new();
        let result = machine.run(&stream(&[Op::In, Op::End(2000)]));

        assert!(result.unwrap_err().contains("input queue"));
    }

    #[test]
    fn test_step_limit_catches_runaway_loops() {
        let lines = vec![
            Line::anchor(Label::Repeat(0)),
            Line::op(Op::Jmp(Label::Repeat(0))),
        ];

        let mut machine = Machine::new();
        let result = machine.run_with_limit(&lines, 10);
        assert!(result.unwrap_err().contains("budget"));
    }

    #[test]
    fn test_running_off_the_stream_is_an_error() {
        let mut machine = Machine::new();
        let result = machine.run(&stream(&[Op::EntA(1)]));

        assert!(result.unwrap_err().contains("without END"));
    }
}
