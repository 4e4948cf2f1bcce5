use drivers::{Direction, GpioController, PinLevel, Port, PortError, PullMode, Register, Volatile};

/// Register block of a single AVR-style port, as laid out in memory.
#[repr(C)]
struct PortRegs {
    pin: Volatile<u8>,
    ddr: Volatile<u8>,
    port: Volatile<u8>,
}

/// Blink-style sequence written only against the HAL trait.
fn pulse<G: GpioController>(gpio: &mut G, pin: G::Pin) -> Result<(), G::Error> {
    gpio.set_direction(pin, Direction::Output)?;
    gpio.set_high(pin)?;
    gpio.toggle(pin)?;
    gpio.toggle(pin)
}

#[test]
fn end_to_end_on_plain_cells() {
    let (mut ddra, mut porta, pina) = (0u8, 0u8, 0b1_0110u8);

    {
        let mut port = Port::<u8, 5>::new(&mut ddra, &mut porta, &pina);

        port.set_output_bit(0).unwrap();
        port.set_output_bit(2).unwrap();
        port.write_bit(0, true).unwrap();
        port.write_bit(2, true).unwrap();

        assert_eq!(
            port.write_bit(1, true),
            Err(PortError::DirectionMismatch { lines: 0b10 })
        );
        assert_eq!(port.read_all(), 0b1_0110);
        assert!(matches!(
            port.read_bit(6),
            Err(PortError::InvalidBitIndex { index: 6, .. })
        ));
    }

    // dropping the port leaves the registers as they were
    assert_eq!(ddra, 0b0_0101);
    assert_eq!(porta, 0b0_0101);
}

#[test]
fn end_to_end_on_mapped_registers() {
    let mut block = PortRegs {
        pin: Volatile::new(0b0100_0001),
        ddr: Volatile::new(0b1000_0000),
        port: Volatile::new(0b1000_0000),
    };
    let addr = &mut block as *mut PortRegs as usize;

    // SAFETY: the three cells are disjoint fields of `block`, which
    // outlives every borrow below
    let (pin, ddr, out) = unsafe {
        (
            Volatile::<u8>::from_addr(addr),
            Volatile::<u8>::from_addr_mut(addr + 1),
            Volatile::<u8>::from_addr_mut(addr + 2),
        )
    };

    let mut port = Port::<Volatile<u8>, 7>::new(ddr, out, pin);
    assert_eq!(port.read_all(), 0b0100_0001);

    pulse(&mut port, 3).unwrap();
    assert_eq!(port.output(), 0b1000_1000);

    port.set_pull(5, PullMode::Up).unwrap();
    port.set_pull(6, PullMode::None).unwrap();
    assert_eq!(port.direction(), 0b1000_1000);
    assert_eq!(port.output(), 0b1010_1000);
    assert_eq!(port.read(6), Ok(PinLevel::High));

    drop(port);
    assert_eq!(block.ddr.read(), 0b1000_1000);
    assert_eq!(block.port.read(), 0b1010_1000);
}

#[test]
fn hal_errors_surface_unchanged() {
    let (mut ddr, mut out, pin) = (0u16, 0u16, 0u16);
    let mut port = Port::<u16, 10>::new(&mut ddr, &mut out, &pin);

    assert_eq!(
        pulse(&mut port, 10),
        Err(PortError::InvalidBitIndex { index: 10, lines: 10 })
    );
    assert_eq!(port.set_pull(1, PullMode::Down), Err(PortError::UnsupportedPull));
    assert_eq!(port.set_low(9), Err(PortError::DirectionMismatch { lines: 1 << 9 }));
}
