//! Register machine shared by the duet and coprocessor puzzles
//!
//! The machine runs one instruction per [`Machine::step`] and reports what the
//! instruction did as an [`Effect`]. Sends and receives are left to the caller, which
//! is how the same interpreter serves both the "sound" reading of `snd`/`rcv` and the
//! two-program message passing reading.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const REGISTER_COUNT: usize = 26;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DuetError {
    #[error("modulo by zero at instruction {pc}")]
    DivisionByZero { pc: usize },
    #[error("arithmetic overflow at instruction {pc}")]
    Overflow { pc: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstructionParseError {
    #[error("unknown instruction {0:?}")]
    UnknownOpcode(String),
    #[error("expected {expected} operand(s) in {line:?}")]
    OperandCount { expected: usize, line: String },
    #[error("invalid register {0:?}")]
    InvalidRegister(String),
    #[error("invalid operand {0:?}")]
    InvalidOperand(String),
}

/// One of the registers `a..=z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    pub fn new(name: char) -> Option<Self> {
        name.is_ascii_lowercase().then(|| Self(name as u8 - b'a'))
    }

    pub fn name(self) -> char {
        (b'a' + self.0) as char
    }
}

impl FromStr for Register {
    type Err = InstructionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(name), None) => {
                Register::new(name).ok_or_else(|| InstructionParseError::InvalidRegister(s.into()))
            }
            _ => Err(InstructionParseError::InvalidRegister(s.into())),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Value(i64),
}

impl FromStr for Operand {
    type Err = InstructionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(register) = s.parse() {
            return Ok(Operand::Register(register));
        }
        s.parse()
            .map(Operand::Value)
            .map_err(|_| InstructionParseError::InvalidOperand(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Snd(Operand),
    Set(Register, Operand),
    Add(Register, Operand),
    Sub(Register, Operand),
    Mul(Register, Operand),
    Mod(Register, Operand),
    Rcv(Register),
    Jgz(Operand, Operand),
    Jnz(Operand, Operand),
}

impl FromStr for Instruction {
    type Err = InstructionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let opcode = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let expect = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(InstructionParseError::OperandCount {
                    expected,
                    line: line.into(),
                })
            }
        };

        let instruction = match opcode {
            "snd" => {
                expect(1)?;
                Instruction::Snd(args[0].parse()?)
            }
            "rcv" => {
                expect(1)?;
                Instruction::Rcv(args[0].parse()?)
            }
            "set" | "add" | "sub" | "mul" | "mod" => {
                expect(2)?;
                let register = args[0].parse()?;
                let operand = args[1].parse()?;
                match opcode {
                    "set" => Instruction::Set(register, operand),
                    "add" => Instruction::Add(register, operand),
                    "sub" => Instruction::Sub(register, operand),
                    "mul" => Instruction::Mul(register, operand),
                    _ => Instruction::Mod(register, operand),
                }
            }
            "jgz" | "jnz" => {
                expect(2)?;
                let condition = args[0].parse()?;
                let offset = args[1].parse()?;
                if opcode == "jgz" {
                    Instruction::Jgz(condition, offset)
                } else {
                    Instruction::Jnz(condition, offset)
                }
            }
            other => return Err(InstructionParseError::UnknownOpcode(other.into())),
        };
        Ok(instruction)
    }
}

/// Observable outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Send(i64),
    /// The machine is parked on a `rcv` until [`Machine::resume`] or [`Machine::deliver`]
    Receive(Register),
    Mul,
}

#[derive(Debug, Clone, Default)]
pub struct Machine {
    registers: [i64; REGISTER_COUNT],
    pc: i64,
    awaiting: Option<Register>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, register: Register) -> i64 {
        self.registers[register.0 as usize]
    }

    pub fn set(&mut self, register: Register, value: i64) {
        self.registers[register.0 as usize] = value;
    }

    pub fn pc(&self) -> i64 {
        self.pc
    }

    pub fn is_halted(&self, program: &[Instruction]) -> bool {
        usize::try_from(self.pc).map_or(true, |pc| pc >= program.len())
    }

    /// Skip the pending `rcv` without writing its register
    pub fn resume(&mut self) {
        if self.awaiting.take().is_some() {
            self.pc += 1;
        }
    }

    /// Complete the pending `rcv` by writing `value` into its register
    pub fn deliver(&mut self, value: i64) {
        if let Some(register) = self.awaiting.take() {
            self.set(register, value);
            self.pc += 1;
        }
    }

    /// Execute the instruction at the program counter
    ///
    /// Returns `Ok(None)` once the program counter is outside the program. While
    /// parked on a `rcv` every call reports the same `Effect::Receive`.
    pub fn step(&mut self, program: &[Instruction]) -> Result<Option<Effect>, DuetError> {
        if let Some(register) = self.awaiting {
            return Ok(Some(Effect::Receive(register)));
        }
        let Some(pc) = usize::try_from(self.pc).ok().filter(|&pc| pc < program.len()) else {
            return Ok(None);
        };

        let overflow = DuetError::Overflow { pc };
        let mut jump = 1;
        let effect = match program[pc] {
            Instruction::Snd(x) => Effect::Send(self.value(x)),
            Instruction::Set(r, y) => {
                self.set(r, self.value(y));
                Effect::None
            }
            Instruction::Add(r, y) => {
                let value = self.get(r).checked_add(self.value(y)).ok_or(overflow)?;
                self.set(r, value);
                Effect::None
            }
            Instruction::Sub(r, y) => {
                let value = self.get(r).checked_sub(self.value(y)).ok_or(overflow)?;
                self.set(r, value);
                Effect::None
            }
            Instruction::Mul(r, y) => {
                let value = self.get(r).checked_mul(self.value(y)).ok_or(overflow)?;
                self.set(r, value);
                Effect::Mul
            }
            Instruction::Mod(r, y) => {
                let divisor = self.value(y);
                if divisor == 0 {
                    return Err(DuetError::DivisionByZero { pc });
                }
                let value = floored_mod(self.get(r), divisor).ok_or(overflow)?;
                self.set(r, value);
                Effect::None
            }
            Instruction::Rcv(r) => {
                self.awaiting = Some(r);
                return Ok(Some(Effect::Receive(r)));
            }
            Instruction::Jgz(x, y) => {
                if self.value(x) > 0 {
                    jump = self.value(y);
                }
                Effect::None
            }
            Instruction::Jnz(x, y) => {
                if self.value(x) != 0 {
                    jump = self.value(y);
                }
                Effect::None
            }
        };

        self.pc = self.pc.checked_add(jump).ok_or(overflow)?;
        Ok(Some(effect))
    }

    fn value(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Register(register) => self.get(register),
            Operand::Value(value) => value,
        }
    }
}

/// Remainder carrying the sign of the divisor
fn floored_mod(value: i64, divisor: i64) -> Option<i64> {
    let rem = value.checked_rem(divisor)?;
    if rem != 0 && (rem < 0) != (divisor < 0) {
        rem.checked_add(divisor)
    } else {
        Some(rem)
    }
}

pub fn parse_program(input: &str) -> Result<Vec<Instruction>, aoc_solver::ParseError> {
    super::parse_lines(input, |line| Ok(line.parse::<Instruction>()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(name: char) -> Register {
        Register::new(name).unwrap()
    }

    #[test]
    fn test_parse_instructions() {
        assert_eq!(
            "jgz a -2".parse::<Instruction>(),
            Ok(Instruction::Jgz(Operand::Register(reg('a')), Operand::Value(-2)))
        );
        assert_eq!(
            "snd 7".parse::<Instruction>(),
            Ok(Instruction::Snd(Operand::Value(7)))
        );
        assert!(matches!(
            "set 1 2".parse::<Instruction>(),
            Err(InstructionParseError::InvalidRegister(_))
        ));
        assert!(matches!(
            "hlt".parse::<Instruction>(),
            Err(InstructionParseError::UnknownOpcode(_))
        ));
        assert!(matches!(
            "add a".parse::<Instruction>(),
            Err(InstructionParseError::OperandCount { expected: 2, .. })
        ));
    }

    #[test]
    fn test_arithmetic_and_effects() {
        let program = parse_program("set a 7\nmul a -3\nmod a 5\nsnd a").unwrap();
        let mut machine = Machine::new();
        assert_eq!(machine.step(&program), Ok(Some(Effect::None)));
        assert_eq!(machine.step(&program), Ok(Some(Effect::Mul)));
        assert_eq!(machine.get(reg('a')), -21);
        machine.step(&program).unwrap();
        // floored: -21 mod 5 == 4
        assert_eq!(machine.get(reg('a')), 4);
        assert_eq!(machine.step(&program), Ok(Some(Effect::Send(4))));
        assert_eq!(machine.step(&program), Ok(None));
        assert!(machine.is_halted(&program));
    }

    #[test]
    fn test_receive_blocks_until_delivered() {
        let program = parse_program("rcv b\nadd b 1").unwrap();
        let mut machine = Machine::new();
        assert_eq!(machine.step(&program), Ok(Some(Effect::Receive(reg('b')))));
        assert_eq!(machine.step(&program), Ok(Some(Effect::Receive(reg('b')))));
        assert_eq!(machine.pc(), 0);

        machine.deliver(41);
        assert_eq!(machine.pc(), 1);
        machine.step(&program).unwrap();
        assert_eq!(machine.get(reg('b')), 42);
    }

    #[test]
    fn test_resume_skips_receive() {
        let program = parse_program("set b 3\nrcv b\nsnd b").unwrap();
        let mut machine = Machine::new();
        machine.step(&program).unwrap();
        machine.step(&program).unwrap();
        machine.resume();
        assert_eq!(machine.step(&program), Ok(Some(Effect::Send(3))));
    }

    #[test]
    fn test_mod_by_zero() {
        let program = parse_program("set a 3\nmod a b").unwrap();
        let mut machine = Machine::new();
        machine.step(&program).unwrap();
        assert_eq!(machine.step(&program), Err(DuetError::DivisionByZero { pc: 1 }));
    }

    #[test]
    fn test_jump_out_of_program_halts() {
        let program = parse_program("jnz 1 -5\nsnd 1").unwrap();
        let mut machine = Machine::new();
        assert_eq!(machine.step(&program), Ok(Some(Effect::None)));
        assert_eq!(machine.step(&program), Ok(None));
    }
}
