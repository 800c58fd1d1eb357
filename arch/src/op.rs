use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Op {
    #[default]
    NOP = 0x00,
    POP = 0x01,
    ADD = 0x02,
    SUB = 0x03,
    MUL = 0x04,
    DIV = 0x05,
    MOD = 0x06,
    AND = 0x07,
    OR = 0x08,
    XOR = 0x09,
    NOT = 0x0A,
    CALL = 0x0B,
    JMP = 0x0C,
    LEA = 0x0D,
    PUSH1 = 0x0E,
    PUSH2 = 0x0F,
    PUSH4 = 0x10,
    PUSH8 = 0x11,
    MODCALL = 0x12,
    JZ = 0x13,
    JB = 0x14,
    JA = 0x15,
    DUP = 0x16,
    HLT = 0x17,
    SWAP = 0x18,
}

impl Op {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown op name: {s}")),
        }
    }

    pub fn code(&self) -> u8 {
        u8::from(*self)
    }
}

impl Op {
    /// Inline immediate width in bytes, for the push family only.
    pub fn push_width(&self) -> Option<usize> {
        use Op::*;
        match self {
            PUSH1 => Some(1),
            PUSH2 => Some(2),
            PUSH4 => Some(4),
            PUSH8 => Some(8),
            _ => None,
        }
    }
}

#[test]
fn test() {
    println!("{}", Op::ADD);
    println!("{:?}", Op::parse("hoge"));
    assert_eq!(Op::NOP.code(), 0x00);
    assert_eq!(Op::PUSH1.code(), 0x0E);
    assert_eq!(Op::SWAP.code(), 0x18);
    assert_eq!(Op::from(0x11u8), Op::PUSH8);
    assert_eq!(Op::from(0xFFu8), Op::NOP);
    assert_eq!(Op::parse("push2"), Ok(Op::PUSH2));
    assert_eq!(Op::parse("MODCALL"), Ok(Op::MODCALL));
    assert!(Op::parse("hoge").is_err());
    assert_eq!(Op::PUSH4.push_width(), Some(4));
    assert_eq!(Op::ADD.push_width(), None);
}
