//! Register Mapping
//!
//! Addresses and widths of the HMC5883L registers. The plain consts are
//! handy in tests and match arms, the enum is what the accessors use.

pub const CONFIG_A: u16 = 0;
pub const CONFIG_B: u16 = 1;
pub const MODE: u16 = 2;
pub const DATA_OUTPUT_X: u16 = 3;
pub const DATA_OUTPUT_Z: u16 = 5;
pub const DATA_OUTPUT_Y: u16 = 7;
pub const STATUS: u16 = 9;
pub const IDENTIFICATION: u16 = 16;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Configuration register A: output rate, averaging, bias.
    ConfigA = CONFIG_A,
    /// Configuration register B: gain.
    ConfigB = CONFIG_B,
    /// Operating mode.
    Mode = MODE,
    /// X axis output, MSB at 3, LSB at 4.
    DataOutputX = DATA_OUTPUT_X,
    /// Z axis output, MSB at 5, LSB at 6.
    DataOutputZ = DATA_OUTPUT_Z,
    /// Y axis output, MSB at 7, LSB at 8.
    DataOutputY = DATA_OUTPUT_Y,
    Status = STATUS,
    /// Three identification bytes, reads back "H43".
    Identification = IDENTIFICATION,
}

impl Register {
    /// Every register in address order.
    pub const ALL: [Register; 8] = [
        Register::ConfigA,
        Register::ConfigB,
        Register::Mode,
        Register::DataOutputX,
        Register::DataOutputZ,
        Register::DataOutputY,
        Register::Status,
        Register::Identification,
    ];

    pub const fn addr(self) -> u16 {
        self as u16
    }

    /// Width in bits as handed to the transport.
    pub const fn width(self) -> u16 {
        match self {
            Register::ConfigA | Register::ConfigB | Register::Mode | Register::Status => 8,
            Register::DataOutputX | Register::DataOutputZ | Register::DataOutputY => 16,
            Register::Identification => 24,
        }
    }
}
