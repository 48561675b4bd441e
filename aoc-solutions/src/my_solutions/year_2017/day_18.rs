use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::duet::{DuetError, Effect, Instruction, Machine, Register, parse_program};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 18, tags = ["2017", "interpreter"])]
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

impl PartSolver<1> for Solver {
    /// `snd` plays a sound and `rcv` recovers the last one when its register is non-zero
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut machine = Machine::new();
        let mut last_played = None;
        while let Some(effect) = machine.step(shared).map_err(failed)? {
            match effect {
                Effect::Send(frequency) => last_played = Some(frequency),
                Effect::Receive(register) if machine.get(register) != 0 => {
                    return last_played
                        .map(|frequency| frequency.to_string())
                        .ok_or_else(|| SolveError::failed("recovered before any sound was played"));
                }
                Effect::Receive(_) => machine.resume(),
                Effect::None | Effect::Mul => {}
            }
        }
        Err(SolveError::failed("program terminated without recovering a frequency"))
    }
}

impl PartSolver<2> for Solver {
    /// Two copies exchange values through queues until both are stuck
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let p = Register::new('p').ok_or_else(|| SolveError::failed("register p"))?;
        let mut peers = [Peer::new(p, 0), Peer::new(p, 1)];

        loop {
            let mut progressed = false;
            for id in 0..2 {
                let (left, right) = peers.split_at_mut(1);
                let (peer, other) = if id == 0 {
                    (&mut left[0], &mut right[0])
                } else {
                    (&mut right[0], &mut left[0])
                };
                progressed |= peer.run_until_blocked(shared, &mut other.inbox).map_err(failed)?;
            }
            if !progressed {
                break;
            }
        }

        debug!(sent_by_0 = peers[0].sent, sent_by_1 = peers[1].sent, "duet deadlocked");
        Ok(peers[1].sent.to_string())
    }
}

struct Peer {
    machine: Machine,
    inbox: VecDeque<i64>,
    sent: u64,
}

impl Peer {
    fn new(id_register: Register, id: i64) -> Self {
        let mut machine = Machine::new();
        machine.set(id_register, id);
        Self {
            machine,
            inbox: VecDeque::new(),
            sent: 0,
        }
    }

    /// Run until halted or waiting on an empty inbox; reports whether anything executed
    fn run_until_blocked(
        &mut self,
        program: &[Instruction],
        outbox: &mut VecDeque<i64>,
    ) -> Result<bool, DuetError> {
        let mut progressed = false;
        while let Some(effect) = self.machine.step(program)? {
            match effect {
                Effect::Send(value) => {
                    outbox.push_back(value);
                    self.sent += 1;
                }
                Effect::Receive(_) => match self.inbox.pop_front() {
                    Some(value) => self.machine.deliver(value),
                    None => break,
                },
                Effect::None | Effect::Mul => {}
            }
            progressed = true;
        }
        Ok(progressed)
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        let input = "set a 1
add a 2
mul a a
mod a 5
snd a
set a 0
rcv a
jgz a -1
set a 1
jgz a -2";
        assert_eq!(solve_part::<super::Solver>(input, 1), "4");
    }

    #[test]
    fn test_part_2() {
        let input = "snd 1\nsnd 2\nsnd p\nrcv a\nrcv b\nrcv c\nrcv d";
        assert_eq!(solve_part::<super::Solver>(input, 2), "3");
    }

    #[test]
    fn test_part_1_without_recovery_fails() {
        let mut program = <super::Solver as aoc_solver::AocParser>::parse("snd 1\nrcv a").unwrap();
        assert!(<super::Solver as aoc_solver::PartSolver<1>>::solve(&mut program).is_err());
    }
}
