//! `Transport` over an embedded-hal I2C bus.
//!
//! The HMC5883L auto-increments its register pointer, so a multi-byte
//! register is one write of the start address followed by a read of
//! `width / 8` bytes, MSB first.

use embedded_hal::i2c;

use crate::Transport;

/// HMC5883L 7-bit address.
pub const SENSOR_ADDR: u8 = 0b0001_1110; // = 0x1E

/// Errors raised by the I2C transport.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    I2C(E),
    /// Register address doesn't fit the one byte register pointer.
    InvalidAddress(u16),
    /// Width is zero, not a whole number of bytes, or wider than the value.
    InvalidWidth(u16),
}

pub struct I2cTransport<I2C>
where I2C: i2c::I2c
{
    i2c: I2C,
    address: u8,
}

impl<E, I2C> I2cTransport<I2C>
where I2C: i2c::I2c<Error = E>
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        I2cTransport { i2c, address }
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    fn read_be(&mut self, address: u16, width: u16, max_bytes: usize) -> Result<u32, Error<E>> {
        let reg = register_pointer(address)?;
        let len = byte_count(width, max_bytes)?;

        let mut buf = [0u8; 4];
        self.i2c
            .write_read(self.address, &[reg], &mut buf[..len])
            .map_err(Error::I2C)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("hmc5883l read reg {=u8}: {=[u8]:x}", reg, &buf[..len]);

        Ok(buf[..len]
            .iter()
            .fold(0u32, |acc, b| (acc << 8) | u32::from(*b)))
    }

    fn write_be(&mut self, address: u16, value: u32, width: u16, max_bytes: usize) -> Result<(), Error<E>> {
        let reg = register_pointer(address)?;
        let len = byte_count(width, max_bytes)?;

        let mut buf = [0u8; 5];
        buf[0] = reg;
        let bytes = value.to_be_bytes();
        buf[1..=len].copy_from_slice(&bytes[4 - len..]);

        #[cfg(feature = "defmt")]
        defmt::trace!("hmc5883l write reg {=u8}: {=[u8]:x}", reg, &buf[1..=len]);

        self.i2c
            .write(self.address, &buf[..=len])
            .map_err(Error::I2C)
    }
}

fn register_pointer<E>(address: u16) -> Result<u8, Error<E>> {
    u8::try_from(address).map_err(|_| Error::InvalidAddress(address))
}

fn byte_count<E>(width: u16, max_bytes: usize) -> Result<usize, Error<E>> {
    let len = usize::from(width / 8);
    if width % 8 != 0 || len == 0 || len > max_bytes {
        return Err(Error::InvalidWidth(width));
    }
    Ok(len)
}

impl<E, I2C> Transport for I2cTransport<I2C>
where I2C: i2c::I2c<Error = E>
{
    type Error = Error<E>;

    fn read8(&mut self, address: u16, width: u16) -> Result<u8, Self::Error> {
        self.read_be(address, width, 1).map(|v| v as u8)
    }

    fn read16(&mut self, address: u16, width: u16) -> Result<u16, Self::Error> {
        self.read_be(address, width, 2).map(|v| v as u16)
    }

    fn read32(&mut self, address: u16, width: u16) -> Result<u32, Self::Error> {
        self.read_be(address, width, 4)
    }

    fn write8(&mut self, address: u16, value: u8, width: u16) -> Result<(), Self::Error> {
        self.write_be(address, u32::from(value), width, 1)
    }

    fn write16(&mut self, address: u16, value: u16, width: u16) -> Result<(), Self::Error> {
        self.write_be(address, u32::from(value), width, 2)
    }

    fn write32(&mut self, address: u16, value: u32, width: u16) -> Result<(), Self::Error> {
        self.write_be(address, value, width, 4)
    }
}


#[cfg(test)]
mod i2c_transport_tests {
    use embedded_hal::i2c::ErrorKind;

    use embedded_hal_mock::eh1::i2c::{
        Mock as I2cMock,
        Transaction as I2cTransaction,
    };

    use super::*;
    use crate::register::Register;
    use crate::Hmc5883l;

    #[test]
    fn read_config_a()
    {
        let expectations = [
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x00], vec![0x70]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        assert_eq!(sensor.get_config_a(), Ok(0x70));

        sensor.release().release().done();
    }

    #[test]
    fn write_mode()
    {
        let expectations = [
            I2cTransaction::write(SENSOR_ADDR, vec![0x02, 0x00]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        assert!(sensor.set_mode(0x00).is_ok());

        sensor.transport_mut().i2c_mut().done();
    }

    #[test]
    fn read_axis_is_big_endian()
    {
        //-2048 on X, MSB at 0x03 then LSB at 0x04.
        let expectations = [
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x03], vec![0xF8, 0x00]),
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x07], vec![0x07, 0xFF]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        let x = sensor.get_data_output_x().unwrap();
        assert_eq!(x, 0xF800);
        assert_eq!(x as i16, -2048);

        let y = sensor.get_data_output_y().unwrap();
        assert_eq!(y as i16, 2047);

        sensor.release().release().done();
    }

    #[test]
    fn write_axis()
    {
        let expectations = [
            I2cTransaction::write(SENSOR_ADDR, vec![0x05, 0x12, 0x34]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        assert!(sensor.set_data_output_z(0x1234).is_ok());

        sensor.release().release().done();
    }

    #[test]
    fn read_identification()
    {
        let expectations = [
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x10], b"H43".to_vec()),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        assert_eq!(sensor.get_identification(), Ok(0x0048_3433));

        sensor.release().release().done();
    }

    #[test]
    fn write_identification_sends_three_bytes()
    {
        let expectations = [
            I2cTransaction::write(SENSOR_ADDR, vec![0x10, 0x48, 0x34, 0x33]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        assert!(sensor.set_identification(0x0048_3433).is_ok());

        sensor.release().release().done();
    }

    #[test]
    fn bus_error_is_passed_through()
    {
        let expectations = [
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x09], vec![0x00])
                .with_error(ErrorKind::Other),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Hmc5883l::new(I2cTransport::new(i2c, SENSOR_ADDR));

        assert_eq!(sensor.get_status(), Err(Error::I2C(ErrorKind::Other)));

        sensor.release().release().done();
    }

    #[test]
    fn rejects_bad_width_and_address()
    {
        let expectations: [I2cTransaction; 0] = [];
        let i2c = I2cMock::new(&expectations);
        let mut transport = I2cTransport::new(i2c, SENSOR_ADDR);

        assert_eq!(transport.read8(0x00, 16), Err(Error::InvalidWidth(16)));
        assert_eq!(transport.read16(0x03, 12), Err(Error::InvalidWidth(12)));
        assert_eq!(transport.read32(0x10, 0), Err(Error::InvalidWidth(0)));
        assert_eq!(transport.write8(0x100, 0, 8), Err(Error::InvalidAddress(0x100)));

        transport.release().done();
    }

    #[test]
    fn custom_device_address()
    {
        let expectations = [
            I2cTransaction::write_read(0x1F, vec![Register::Status.addr() as u8], vec![0x01]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut transport = I2cTransport::new(i2c, 0x1F);

        assert_eq!(transport.read8(Register::Status.addr(), 8), Ok(0x01));

        transport.release().done();
    }
}
