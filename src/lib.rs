//! Raw register access for the Honeywell HMC5883L 3-axis magnetometer.
//!
//! [`Hmc5883l`] has one getter and one setter per register. Each is a single
//! call into a [`Transport`] at the register's fixed address and width, and
//! values go in and come out untouched. Field layouts live in [`fields`] for
//! callers to mask and shift themselves.
//!
//! The device runs its own measurement state machine (idle, single,
//! continuous, RDY latching, output lock). Nothing here tracks or enforces
//! it: read `Status` before trusting the data output registers.
#![cfg_attr(not(test), no_std)]

pub mod fields;
pub mod i2c;
pub mod register;

pub use crate::register::Register;


/// Bus access the register layer is built on.
///
/// `width` is the number of register bits involved, which can be smaller
/// than the value type (Identification is 24 bits carried in a `u32`).
/// Errors come back to the caller exactly as the implementation raised them.
pub trait Transport {
    type Error;

    fn read8(&mut self, address: u16, width: u16) -> Result<u8, Self::Error>;
    fn read16(&mut self, address: u16, width: u16) -> Result<u16, Self::Error>;
    fn read32(&mut self, address: u16, width: u16) -> Result<u32, Self::Error>;

    fn write8(&mut self, address: u16, value: u8, width: u16) -> Result<(), Self::Error>;
    fn write16(&mut self, address: u16, value: u16, width: u16) -> Result<(), Self::Error>;
    fn write32(&mut self, address: u16, value: u32, width: u16) -> Result<(), Self::Error>;
}


pub struct Hmc5883l<T>
where T: Transport
{
    transport: T,
}

impl<T> Hmc5883l<T>
where T: Transport
{
    pub fn new(transport: T) -> Self {
        Hmc5883l { transport }
    }

    /// Gives the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn set_config_a(&mut self, value: u8) -> Result<(), T::Error> {
        let reg = Register::ConfigA;
        self.transport.write8(reg.addr(), value, reg.width())
    }

    pub fn get_config_a(&mut self) -> Result<u8, T::Error> {
        let reg = Register::ConfigA;
        self.transport.read8(reg.addr(), reg.width())
    }

    pub fn set_config_b(&mut self, value: u8) -> Result<(), T::Error> {
        let reg = Register::ConfigB;
        self.transport.write8(reg.addr(), value, reg.width())
    }

    pub fn get_config_b(&mut self) -> Result<u8, T::Error> {
        let reg = Register::ConfigB;
        self.transport.read8(reg.addr(), reg.width())
    }

    pub fn set_mode(&mut self, value: u8) -> Result<(), T::Error> {
        let reg = Register::Mode;
        self.transport.write8(reg.addr(), value, reg.width())
    }

    /// Reading the mode register sets the status LOCK bit.
    pub fn get_mode(&mut self) -> Result<u8, T::Error> {
        let reg = Register::Mode;
        self.transport.read8(reg.addr(), reg.width())
    }

    pub fn set_data_output_x(&mut self, value: u16) -> Result<(), T::Error> {
        let reg = Register::DataOutputX;
        self.transport.write16(reg.addr(), value, reg.width())
    }

    /// Raw 2's complement X reading, cast to `i16` for the signed value.
    pub fn get_data_output_x(&mut self) -> Result<u16, T::Error> {
        let reg = Register::DataOutputX;
        self.transport.read16(reg.addr(), reg.width())
    }

    pub fn set_data_output_z(&mut self, value: u16) -> Result<(), T::Error> {
        let reg = Register::DataOutputZ;
        self.transport.write16(reg.addr(), value, reg.width())
    }

    pub fn get_data_output_z(&mut self) -> Result<u16, T::Error> {
        let reg = Register::DataOutputZ;
        self.transport.read16(reg.addr(), reg.width())
    }

    pub fn set_data_output_y(&mut self, value: u16) -> Result<(), T::Error> {
        let reg = Register::DataOutputY;
        self.transport.write16(reg.addr(), value, reg.width())
    }

    pub fn get_data_output_y(&mut self) -> Result<u16, T::Error> {
        let reg = Register::DataOutputY;
        self.transport.read16(reg.addr(), reg.width())
    }

    pub fn set_status(&mut self, value: u8) -> Result<(), T::Error> {
        let reg = Register::Status;
        self.transport.write8(reg.addr(), value, reg.width())
    }

    pub fn get_status(&mut self) -> Result<u8, T::Error> {
        let reg = Register::Status;
        self.transport.read8(reg.addr(), reg.width())
    }

    pub fn set_identification(&mut self, value: u32) -> Result<(), T::Error> {
        let reg = Register::Identification;
        self.transport.write32(reg.addr(), value, reg.width())
    }

    /// 24 bit value in the low bits of the `u32`.
    pub fn get_identification(&mut self) -> Result<u32, T::Error> {
        let reg = Register::Identification;
        self.transport.read32(reg.addr(), reg.width())
    }
}
