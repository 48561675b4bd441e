use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::duet::{DuetError, Effect, Instruction, Machine, Operand, Register, parse_program};

/// Instructions allowed before the setup code must have reached the first `set f 1`
const SETUP_BUDGET: usize = 10_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 23, tags = ["2017", "interpreter", "reverse-engineering"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_program(input)
    }
}

fn failed(e: DuetError) -> SolveError {
    SolveError::SolveFailed(e.into())
}

fn register(name: char) -> Result<Register, SolveError> {
    Register::new(name).ok_or_else(|| SolveError::failed(format!("invalid register {name}")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut machine = Machine::new();
        let mut multiplications = 0u64;
        while let Some(effect) = machine.step(shared).map_err(failed)? {
            match effect {
                Effect::Mul => multiplications += 1,
                Effect::Receive(_) => machine.resume(),
                Effect::None | Effect::Send(_) => {}
            }
        }
        Ok(multiplications.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The program counts the composite numbers among `b, b + step, ..., c`
    ///
    /// The setup code is executed as-is to learn `b` and `c`; the counting loop
    /// is replaced by trial division.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b, c, f) = (register('a')?, register('b')?, register('c')?, register('f')?);

        let loop_start = shared
            .iter()
            .position(|&instruction| instruction == Instruction::Set(f, Operand::Value(1)))
            .ok_or_else(|| SolveError::failed("no `set f 1` marks the start of the prime test"))?;
        let step = shared
            .iter()
            .rev()
            .find_map(|instruction| match *instruction {
                Instruction::Sub(r, Operand::Value(v)) if r == b && v < 0 => Some(v.checked_neg()),
                _ => None,
            })
            .ok_or_else(|| SolveError::failed("no `sub b -n` advances b"))?
            .ok_or_else(|| SolveError::failed("`sub b` step does not fit in a register"))?;

        let mut machine = Machine::new();
        machine.set(a, 1);
        let mut executed = 0;
        while machine.pc() != loop_start as i64 {
            if executed == SETUP_BUDGET || machine.step(shared).map_err(failed)?.is_none() {
                return Err(SolveError::failed("setup code never reached the prime test"));
            }
            executed += 1;
        }

        let (low, high) = (machine.get(b), machine.get(c));
        debug!(low, high, step, "counting composites");
        let composites = (low..=high)
            .step_by(step as usize)
            .filter(|&n| is_composite(n))
            .count();
        Ok(composites.to_string())
    }
}

fn is_composite(n: i64) -> bool {
    n > 3
        && (2i64..)
            .take_while(|d| d.checked_mul(*d).is_some_and(|square| square <= n))
            .any(|d| n % d == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    const PROGRAM: &str = "set b 57
set c b
jnz a 2
jnz 1 5
mul b 100
sub b -100000
set c b
sub c -17000
set f 1
set d 2
set e 2
set g d
mul g e
sub g b
jnz g 2
set f 0
sub e -1
set g e
sub g b
jnz g -8
sub d -1
set g d
sub g b
jnz g -13
jnz f 2
sub h -1
set g b
sub g c
jnz g 2
jnz 1 3
sub b -17
jnz 1 -23";

    #[test]
    fn test_part_1_counts_multiplications() {
        assert_eq!(solve_part::<Solver>(PROGRAM, 1), "3025");
    }

    #[test]
    fn test_part_2_counts_composites() {
        assert_eq!(solve_part::<Solver>(PROGRAM, 2), "915");
    }

    #[test]
    fn test_is_composite() {
        let composites: Vec<i64> = (0..20).filter(|&n| is_composite(n)).collect();
        assert_eq!(composites, vec![4, 6, 8, 9, 10, 12, 14, 15, 16, 18]);
    }

    #[test]
    fn test_part_2_rejects_unrepresentable_step() {
        let program = PROGRAM.replace("sub b -17\n", &format!("sub b {}\n", i64::MIN));
        let mut program = Solver::parse(&program).unwrap();
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut program),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_part_2_without_marker_fails() {
        let mut program = Solver::parse("set b 1\nsub b -1").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut program).is_err());
    }
}
