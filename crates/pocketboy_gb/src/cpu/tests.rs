use super::*;

struct TestBus {
    memory: [u8; 0x10000],
    ticks: u64,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            ticks: 0,
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn tick(&mut self, mcycles: u32) {
        self.ticks += mcycles as u64;
    }
}

/// CPU in post-boot state with `program` placed at 0x0100.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

fn run_until_halt(cpu: &mut Cpu, bus: &mut TestBus) -> u64 {
    let start = cpu.cycles();
    for _ in 0..1000 {
        if cpu.halted {
            break;
        }
        cpu.step(bus);
    }
    assert!(cpu.halted, "program did not reach HALT");
    cpu.cycles() - start
}

fn single_step_cycles(program: &[u8], flags: Flags) -> u32 {
    let (mut cpu, mut bus) = setup(program);
    cpu.regs.f = flags;
    cpu.regs.sp = 0xD000;
    cpu.regs.set_hl(0xC000);
    cpu.step(&mut bus)
}

// --- decoder / encoder ---

#[test]
fn every_primary_opcode_round_trips_through_encode() {
    for opcode in 0u8..=0xFF {
        if opcode == 0xCB || opcode == 0x10 {
            continue;
        }
        let bytes = [opcode, 0x34, 0x12];
        let mut stream = bytes.iter().copied();
        let instruction = decode(&mut stream).expect("complete instruction");
        let consumed = bytes.len() - stream.len();
        assert_eq!(
            instruction.encode(),
            bytes[..consumed].to_vec(),
            "opcode 0x{opcode:02X} decoded as {instruction:?}"
        );
    }
}

#[test]
fn every_prefixed_opcode_round_trips_through_encode() {
    for opcode in 0u8..=0xFF {
        let bytes = [0xCB, opcode];
        let instruction = decode(&mut bytes.iter().copied()).expect("complete instruction");
        assert_eq!(instruction.encode(), bytes.to_vec(), "CB 0x{opcode:02X}");
    }
}

#[test]
fn stop_consumes_its_padding_byte() {
    let mut stream = [0x10, 0x00, 0x76].into_iter();
    assert_eq!(decode(&mut stream), Some(Instruction::Stop));
    assert_eq!(decode(&mut stream), Some(Instruction::Halt));
    assert_eq!(Instruction::Stop.encode(), vec![0x10, 0x00]);
}

#[test]
fn variants_round_trip_through_decode() {
    use Instruction::*;

    let samples = [
        Move {
            dst: Reg8::A,
            src: Reg8::M,
        },
        MoveImmediate {
            dst: Reg8::M,
            value: 0x99,
        },
        LoadIndirect(Reg16::DE),
        StoreIndirect(Reg16::BC),
        LoadRelative(Relative::C),
        StoreRelative(Relative::Immediate8(0x80)),
        LoadRelative(Relative::Immediate16(0xC123)),
        LoadRegisterPairImmediate {
            dst: Reg16::SP,
            value: 0xFFFE,
        },
        Push(Reg16::AF),
        Pop(Reg16::AF),
        Push(Reg16::HL),
        LoadHlSp(-8),
        StoreSp(0xC000),
        Add {
            src: Reg8::B,
            carry: true,
        },
        SubtractImmediate {
            value: 0x10,
            carry: true,
        },
        Cmp(Reg8::M),
        AddPair(Reg16::SP),
        IncrementPair(Reg16::SP),
        DecrementPair(Reg16::HL),
        AddSp(-1),
        Rr(Reg8::M),
        ShiftRightArith(Reg8::C),
        Swap(Reg8::A),
        Bit {
            bit: 7,
            reg: Reg8::H,
        },
        Set {
            bit: 0,
            reg: Reg8::M,
        },
        Reset {
            bit: 3,
            reg: Reg8::E,
        },
        JumpImmediateCond(Condition::NC, 0x4000),
        JumpRelativeCond(Condition::Z, -2),
        CallCond(Condition::C, 0x1234),
        ReturnCond(Condition::NZ),
        Rst(0x38),
        Stop,
        Halt,
        InvalidOpcode(0xDD),
    ];

    for instruction in samples {
        let bytes = instruction.encode();
        assert_eq!(
            decode(&mut bytes.iter().copied()),
            Some(instruction),
            "{instruction}"
        );
    }
}

#[test]
fn pair_slot_three_is_sp_or_af_by_opcode_group() {
    assert_eq!(
        decode(&mut [0x31, 0x00, 0xD0].into_iter()),
        Some(Instruction::LoadRegisterPairImmediate {
            dst: Reg16::SP,
            value: 0xD000
        })
    );
    assert_eq!(
        decode(&mut [0xF5].into_iter()),
        Some(Instruction::Push(Reg16::AF))
    );
    assert_eq!(
        decode(&mut [0xF1].into_iter()),
        Some(Instruction::Pop(Reg16::AF))
    );
}

#[test]
fn halt_wins_over_memory_to_memory_move() {
    assert_eq!(decode(&mut [0x76].into_iter()), Some(Instruction::Halt));
}

#[test]
fn holes_decode_as_invalid_opcodes() {
    for opcode in [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ] {
        assert_eq!(
            decode(&mut [opcode].into_iter()),
            Some(Instruction::InvalidOpcode(opcode))
        );
    }
}

#[test]
fn truncated_stream_yields_none() {
    assert_eq!(decode(&mut [0xC3, 0x00].into_iter()), None);
    assert_eq!(decode(&mut [0xCB].into_iter()), None);
    assert_eq!(decode(&mut std::iter::empty::<u8>()), None);
}

#[test]
fn decoder_iterates_a_program() {
    let program = Decoder::new([0x3E, 0x03, 0x47, 0x48, 0x76].into_iter()).collect::<Vec<_>>();
    assert_eq!(
        program,
        vec![
            Instruction::MoveImmediate {
                dst: Reg8::A,
                value: 3
            },
            Instruction::Move {
                dst: Reg8::B,
                src: Reg8::A
            },
            Instruction::Move {
                dst: Reg8::C,
                src: Reg8::B
            },
            Instruction::Halt,
        ]
    );
}

#[test]
fn display_uses_conventional_mnemonics() {
    assert_eq!(Instruction::LoadHlSp(-2).to_string(), "LD HL,SP-2");
    assert_eq!(
        Instruction::Bit {
            bit: 3,
            reg: Reg8::M
        }
        .to_string(),
        "BIT 3,(HL)"
    );
    assert_eq!(
        Instruction::StoreRelative(Relative::Immediate8(0x40)).to_string(),
        "LD ($FF00+$40),A"
    );
}

// --- registers ---

#[test]
fn af_clears_low_flag_nibble() {
    let mut regs = Registers::default();
    regs.set_af(0x12FF);
    assert_eq!(regs.a, 0x12);
    assert_eq!(regs.f.bits(), 0xF0);
    assert_eq!(regs.af(), 0x12F0);
}

#[test]
fn pop_af_masks_flags() {
    let (mut cpu, mut bus) = setup(&[0xF1]);
    cpu.regs.sp = 0xD000;
    bus.memory[0xD000] = 0xFF;
    bus.memory[0xD001] = 0x80;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.af(), 0x80F0);
}

// --- cycle accounting ---

#[test]
fn published_cycle_counts() {
    let none = Flags::empty();
    let cases: &[(&[u8], u32, &str)] = &[
        (&[0x00], 1, "NOP"),
        (&[0x41], 1, "LD B,C"),
        (&[0x06, 0x12], 2, "LD B,n"),
        (&[0x46], 2, "LD B,(HL)"),
        (&[0x70], 2, "LD (HL),B"),
        (&[0x36, 0x12], 3, "LD (HL),n"),
        (&[0x0A], 2, "LD A,(BC)"),
        (&[0xEA, 0x00, 0xC0], 4, "LD (nn),A"),
        (&[0xFA, 0x00, 0xC0], 4, "LD A,(nn)"),
        (&[0xE0, 0x80], 3, "LDH (n),A"),
        (&[0xF2], 2, "LD A,(C)"),
        (&[0x22], 2, "LD (HL+),A"),
        (&[0x01, 0x34, 0x12], 3, "LD BC,nn"),
        (&[0xF9], 2, "LD SP,HL"),
        (&[0xF8, 0x02], 3, "LD HL,SP+e"),
        (&[0x08, 0x00, 0xC0], 5, "LD (nn),SP"),
        (&[0xC5], 4, "PUSH BC"),
        (&[0xC1], 3, "POP BC"),
        (&[0x80], 1, "ADD A,B"),
        (&[0x86], 2, "ADD A,(HL)"),
        (&[0xC6, 0x01], 2, "ADD A,n"),
        (&[0x34], 3, "INC (HL)"),
        (&[0x09], 2, "ADD HL,BC"),
        (&[0xE8, 0x01], 4, "ADD SP,e"),
        (&[0x03], 2, "INC BC"),
        (&[0x07], 1, "RLCA"),
        (&[0xCB, 0x00], 2, "RLC B"),
        (&[0xCB, 0x06], 4, "RLC (HL)"),
        (&[0xCB, 0x46], 3, "BIT 0,(HL)"),
        (&[0xCB, 0xC6], 4, "SET 0,(HL)"),
        (&[0xC3, 0x00, 0x02], 4, "JP nn"),
        (&[0xE9], 1, "JP (HL)"),
        (&[0x18, 0x00], 3, "JR e"),
        (&[0xCD, 0x00, 0x02], 6, "CALL nn"),
        (&[0xC9], 4, "RET"),
        (&[0xD9], 4, "RETI"),
        (&[0xFF], 4, "RST 38"),
        (&[0x76], 1, "HALT"),
        (&[0xFB], 1, "EI"),
    ];

    for &(program, expected, name) in cases {
        assert_eq!(single_step_cycles(program, none), expected, "{name}");
    }
}

#[test]
fn taken_conditional_branches_cost_more() {
    let taken = Flags::empty();
    let not_taken = Flags::Z;
    let cases: &[(&[u8], u32, u32, &str)] = &[
        (&[0x20, 0x00], 3, 2, "JR NZ"),
        (&[0xC2, 0x00, 0x02], 4, 3, "JP NZ"),
        (&[0xC4, 0x00, 0x02], 6, 3, "CALL NZ"),
        (&[0xC0], 5, 2, "RET NZ"),
    ];

    for &(program, when_taken, when_skipped, name) in cases {
        assert_eq!(single_step_cycles(program, taken), when_taken, "{name} taken");
        assert_eq!(single_step_cycles(program, not_taken), when_skipped, "{name} skipped");
    }
}

#[test]
fn every_charged_cycle_ticks_the_bus() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02, 0x00]);
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 6);
    assert_eq!(bus.ticks, 6);
    assert_eq!(cpu.cycles(), 6);
}

// --- execution scenarios ---

#[test]
fn register_chain_program() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x03, 0x47, 0x48, 0x76]);
    let cycles = run_until_halt(&mut cpu, &mut bus);
    assert_eq!((cpu.regs.a, cpu.regs.b, cpu.regs.c), (3, 3, 3));
    assert_eq!(cpu.regs.pc, 0x0105);
    // LD A,n (2) + LD B,A (1) + LD C,B (1) + HALT (1)
    assert_eq!(cycles, 5);
}

#[test]
fn push_pop_moves_a_pair() {
    let (mut cpu, mut bus) = setup(&[0x21, 0x34, 0x12, 0xE5, 0xC1, 0x76]);
    let sp = cpu.regs.sp;
    run_until_halt(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.regs.sp, sp);
    // Big-endian push: high byte at the higher address.
    assert_eq!(bus.memory[sp as usize - 1], 0x12);
    assert_eq!(bus.memory[sp as usize - 2], 0x34);
}

#[test]
fn daa_after_decimal_add() {
    // LD A,15h; LD B,27h; ADD A,B; DAA; HALT
    let (mut cpu, mut bus) = setup(&[0x3E, 0x15, 0x06, 0x27, 0x80, 0x27, 0x76]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x3C);
    assert!(!cpu.regs.f.contains(Flags::H));
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.regs.f.contains(Flags::C));
}

#[test]
fn call_and_return() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02, 0x76]);
    bus.memory[0x0200] = 0x3E; // LD A,7
    bus.memory[0x0201] = 0x07;
    bus.memory[0x0202] = 0xC9; // RET
    run_until_halt(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 7);
    assert_eq!(cpu.regs.pc, 0x0104);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn rst_pushes_pc_and_jumps_to_vector() {
    let (mut cpu, mut bus) = setup(&[0xEF]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xFFFC], 0x01);
    assert_eq!(bus.memory[0xFFFD], 0x01);
}

#[test]
fn relative_jump_backwards() {
    let (mut cpu, mut bus) = setup(&[0x00, 0x18, 0xFD]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn hl_increment_and_decrement_loads() {
    // LD HL,C000; LD A,5; LD (HL+),A; LD (HL-),A; LD A,(HL-); HALT
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xC0, 0x3E, 0x05, 0x22, 0x32, 0x3A, 0x76]);
    run_until_halt(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC000], 5);
    assert_eq!(bus.memory[0xC001], 5);
    assert_eq!(cpu.regs.hl(), 0xBFFF);
    assert_eq!(cpu.regs.a, 5);
}

#[test]
fn accumulator_rotates_clear_zero() {
    let (mut cpu, mut bus) = setup(&[0x17]);
    cpu.regs.a = 0x80;
    cpu.regs.f = Flags::empty();
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::C);

    let (mut cpu, mut bus) = setup(&[0xCB, 0x17]);
    cpu.regs.a = 0x80;
    cpu.regs.f = Flags::empty();
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::C);
}

#[test]
fn memory_operand_bit_ops() {
    // LD HL,C000; SET 3,(HL); SWAP (HL); BIT 7,(HL); HALT
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xC0, 0xCB, 0xDE, 0xCB, 0x36, 0xCB, 0x7E, 0x76]);
    run_until_halt(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC000], 0x80);
    assert!(!cpu.regs.f.contains(Flags::Z));
}

// --- interrupts ---

#[test]
fn lowest_pending_interrupt_is_serviced_first() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x05;
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 5);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[0xFF0F], 0x04);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(bus.memory[0xFFFC], 0x00);
}

#[test]
fn masked_interrupts_are_not_taken() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x04;
    bus.memory[0xFF0F] = 0x01;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
}

#[test]
fn interrupt_vectors() {
    let vectors: Vec<u16> = Interrupt::ALL.iter().map(|i| i.vector()).collect();
    assert_eq!(vectors, vec![0x40, 0x48, 0x50, 0x58, 0x60]);
    assert_eq!(Interrupt::highest(0b1_0100), Some(Interrupt::Timer));
    assert_eq!(Interrupt::highest(0), None);
}

#[test]
fn ei_takes_effect_at_the_start_of_the_next_step() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0x3C, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    let a = cpu.regs.a;

    cpu.step(&mut bus); // EI
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0101);

    // IME is promoted first, so the interrupt wins over INC A.
    assert_eq!(cpu.step(&mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.regs.a, a);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x00);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(bus.memory[0xFFFC], 0x01);
}

#[test]
fn ei_without_pending_interrupt_enables_on_next_step() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    cpu.step(&mut bus);
    assert!(!cpu.ime);
    cpu.step(&mut bus);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn di_cancels_a_pending_ei() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert!(!cpu.ime);
}

#[test]
fn reti_reenables_interrupts() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xD000;
    bus.memory[0xD000] = 0x00;
    bus.memory[0xD001] = 0x02;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0200);
    cpu.step(&mut bus);
    assert!(cpu.ime);
}

#[test]
fn halt_wakes_without_servicing_when_ime_is_clear() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    bus.memory[0xFFFF] = 0x04;
    cpu.step(&mut bus);
    assert!(cpu.halted);

    // Nothing pending: the CPU idles one cycle at a time.
    assert_eq!(cpu.step(&mut bus), 1);
    assert!(cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0101);

    bus.memory[0xFF0F] = 0x04;
    cpu.step(&mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.memory[0xFF0F], 0x04);
}

#[test]
fn halt_with_ime_services_the_interrupt() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x10;
    cpu.step(&mut bus);
    bus.memory[0xFF0F] = 0x10;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0060);
    assert_eq!(bus.memory[0xFF0F], 0x00);
}

// --- traps and low-power states ---

#[test]
fn invalid_opcodes_act_as_nop() {
    let (mut cpu, mut bus) = setup(&[0xDD, 0xDD, 0x3C]);
    let a = cpu.regs.a;
    assert_eq!(cpu.step(&mut bus), 1);
    assert_eq!(cpu.step(&mut bus), 1);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.a, a.wrapping_add(1));
    assert_ne!(cpu.invalid_reported[3] & (1 << (0xDD & 0x3F)), 0);
}

#[test]
fn stop_freezes_until_resumed() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);
    assert_eq!(cpu.step(&mut bus), 2);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.step(&mut bus), 0);
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.resume();
    assert_eq!(cpu.step(&mut bus), 1);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn independent_cpus_do_not_share_state() {
    let (mut a, mut bus_a) = setup(&[0x3C]);
    let (b, _) = setup(&[0x3C]);
    a.step(&mut bus_a);
    assert_ne!(a.regs.a, b.regs.a);
    assert_eq!(b.cycles(), 0);
}
