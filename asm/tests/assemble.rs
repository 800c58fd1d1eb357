use arch::op::Op;
use svasm::{assemble, Error, ErrorClass, ErrorKind};

fn case(src: &str, expect: &[u8]) {
    println!("---\n{src}");
    let bytes = assemble(src, false).unwrap();
    println!("{bytes:02X?}");
    assert_eq!(bytes, expect);
}

fn fail(src: &str) -> Error {
    println!("---\n{src}");
    let err = assemble(src, false).unwrap_err();
    println!("{err}");
    err
}

// ----------------------------------------------------------------------------
// Successful assembly

#[test]
fn bare_instruction() {
    case("NOP", &[0x00]);
    case("hlt", &[0x17]);
    case("nop\npop\nswap", &[0x00, 0x01, 0x18]);
}

#[test]
fn data_bytes() {
    case("DB 1,2,3", &[1, 2, 3]);
    case("DB \"AB\"", &[0x41, 0x42]);
    case("db 0x41, 'B', \"CD\"", &[0x41, 0x42, 0x43, 0x44]);
}

#[test]
fn push_variants() {
    case("PUSH1 5", &[0x0E, 5]);
    case("PUSH2 0x0102", &[0x0F, 0x02, 0x01]);
    case("PUSH4 1", &[0x10, 1, 0, 0, 0]);
    case("PUSH8 1", &[0x11, 1, 0, 0, 0, 0, 0, 0, 0]);
    case("PUSH1 255", &[0x0E, 0xFF]);
    case(
        "PUSH8 0xFFFFFFFFFFFFFFFF",
        &[0x11, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
    );
}

#[test]
fn implicit_wide_push() {
    case("ADD 5", &[0x11, 5, 0, 0, 0, 0, 0, 0, 0, 0x02]);
}

#[test]
fn times_expansion() {
    case("times 3 NOP", &[0x00, 0x00, 0x00]);
    case("times 2 db 1, 2", &[1, 2, 1, 2]);
    case("times 2 times 2 nop", &[0; 4]);
    case("times 0 nop\nhlt", &[0x17]);
}

#[test]
fn constants() {
    case("X EQU 10\nPUSH1 X", &[0x0E, 0x0A]);
    case("x equ 2\nY EQU 0x10\nPUSH1 y\nPUSH1 X", &[0x0E, 0x10, 0x0E, 0x02]);
}

#[test]
fn labels_resolve_forward_and_back() {
    case(
        "PUSH1 5\n[L]\nNOP\nJMP L",
        &[0x0E, 5, 0x00, 0x11, 2, 0, 0, 0, 0, 0, 0, 0, 0x0C],
    );
    case(
        "[Loop]\nnop\nJMP loop",
        &[0x00, 0x11, 0, 0, 0, 0, 0, 0, 0, 0, 0x0C],
    );
}

#[test]
fn trailing_label() {
    case("[start]\nPUSH2 end\n[end]", &[0x0F, 3, 0]);
    case("PUSH8 after\n[after]", &[0x11, 9, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn labels_and_constants_are_separate_spaces() {
    // the same name may be both; operands prefer the known constant
    case("[x]\nx EQU 7\nPUSH1 x", &[0x0E, 7]);
    case("[x]\nPUSH1 x", &[0x0E, 0]);
}

#[test]
fn strings_keep_case_when_folding() {
    assert_eq!(
        assemble("DB \"AB\"", false).unwrap(),
        assemble("DB \"AB\"", true).unwrap()
    );
}

#[test]
fn mnemonics_ignore_case_always() {
    assert_eq!(assemble("nop\nNOP\nNop", true).unwrap(), vec![0, 0, 0]);
}

#[test]
fn emitted_length_matches_sizes() {
    let src = "PUSH1 1\nPUSH2 2\nPUSH4 4\nPUSH8 8\nADD 1\ndb 1,2,3\nNOP";
    let bytes = assemble(src, false).unwrap();
    assert_eq!(bytes.len(), 2 + 3 + 5 + 9 + 10 + 3 + 1);
}

#[test]
fn empty_source() {
    case("", &[]);
    case("; just a comment\n\n", &[]);
}

// ----------------------------------------------------------------------------
// Errors

#[test]
fn data_out_of_range() {
    let err = fail("DB 256");
    assert_eq!(err.kind, ErrorKind::ByteOutOfRange(256));
    assert_eq!(err.kind.class(), ErrorClass::Range);
    assert_eq!(err.line, Some(1));
    assert_eq!(err.raw.as_deref(), Some("DB 256"));
}

#[test]
fn unknown_instruction() {
    let err = fail("nop\nFROB 1");
    assert_eq!(err.kind, ErrorKind::UnknownInstruction("FROB".into()));
    assert_eq!(err.kind.class(), ErrorClass::Syntax);
    assert_eq!(err.line, Some(2));
}

#[test]
fn undefined_symbol_detected_at_emission() {
    let err = fail("JMP nowhere");
    assert_eq!(err.kind, ErrorKind::UndefinedSymbol("nowhere".into()));
    assert_eq!(err.kind.class(), ErrorClass::UnresolvedSymbol);
}

#[test]
fn constant_must_precede_use() {
    let err = fail("PUSH1 X\nX EQU 1");
    assert_eq!(err.kind, ErrorKind::UndefinedSymbol("X".into()));
    assert_eq!(err.line, Some(1));
}

#[test]
fn redefined_label() {
    let err = fail("[a]\nnop\n[A]\nnop");
    assert_eq!(
        err.kind,
        ErrorKind::RedefinedLabel {
            name: "A".into(),
            first: 1
        }
    );
    assert_eq!(err.kind.class(), ErrorClass::Redefinition);
    assert_eq!(err.line, Some(3));
    assert!(assemble("[a]\nnop\n[A]\nnop", true).is_ok());
}

#[test]
fn redefined_constant() {
    let err = fail("K EQU 1\nK EQU 2");
    assert_eq!(
        err.kind,
        ErrorKind::RedefinedConst {
            name: "K".into(),
            first: 1
        }
    );
    assert_eq!(err.line, Some(2));
}

#[test]
fn negative_times() {
    let err = fail("times -2 nop");
    assert_eq!(err.kind, ErrorKind::NegativeRepeat(-2));
    assert_eq!(err.kind.class(), ErrorClass::Range);
}

#[test]
fn times_errors_point_at_the_directive() {
    let err = fail("nop\ntimes 2 PUSH1");
    assert_eq!(err.kind, ErrorKind::MissingOperand(Op::PUSH1));
    assert_eq!(err.line, Some(2));
    assert_eq!(err.raw.as_deref(), Some("times 2 PUSH1"));
}

#[test]
fn push_without_operand() {
    let err = fail("PUSH1");
    assert_eq!(err.kind, ErrorKind::MissingOperand(Op::PUSH1));
    assert_eq!(err.kind.class(), ErrorClass::Syntax);
}

#[test]
fn operand_count() {
    let err = fail("ADD 1 2");
    assert_eq!(err.kind, ErrorKind::ExtraOperands("ADD".into()));
}

#[test]
fn immediate_too_wide() {
    let err = fail("PUSH1 256");
    assert_eq!(err.kind, ErrorKind::ImmOutOfRange { value: 256, width: 1 });
    assert_eq!(err.kind.class(), ErrorClass::Range);
}

#[test]
fn negative_immediate() {
    let err = fail("PUSH4 -1");
    assert_eq!(err.kind, ErrorKind::ImmOutOfRange { value: -1, width: 4 });
}

#[test]
fn comment_marker_cuts_strings_too() {
    let err = fail("db \"a;b\"");
    assert_eq!(err.kind, ErrorKind::BadDataArg("\"a".into()));
}
