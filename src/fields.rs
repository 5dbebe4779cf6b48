//! Bit fields of every register.
//!
//! Each register gets a submodule holding a `BitField` per field plus the
//! named legal values. Field values are stored unshifted, so a caller pulls
//! one out of a raw register with `(raw & F.mask) >> F.shift` and packs one
//! in with `(value << F.shift) & F.mask`. Reserved bits are listed so they
//! can be preserved, nothing here enforces it.

/// Location and reset value of one field inside a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField<T> {
    pub mask: T,
    pub shift: u8,
    /// Reset value, unshifted.
    pub default: T,
}

impl<T> BitField<T> {
    pub const fn new(mask: T, shift: u8, default: T) -> Self {
        BitField { mask, shift, default }
    }
}

//Gives every raw-value enum a fallible conversion back from u8. The error
//carries the value that didn't match.
macro_rules! impl_try_from_u8 {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                $(
                    if value == $name::$variant as u8 {
                        return Ok($name::$variant);
                    }
                )+
                Err(value)
            }
        }
    };
}

pub mod config_a {
    use super::BitField;

    /// Reserved, write 0.
    pub const CRA7: BitField<u8> = BitField::new(0b1000_0000, 7, 0b0);
    /// Samples averaged per measurement output.
    pub const MA: BitField<u8> = BitField::new(0b0110_0000, 5, 0b00);
    /// Data output rate in continuous measurement mode.
    pub const DO: BitField<u8> = BitField::new(0b0001_1100, 2, 0b100);
    /// Measurement configuration (bias).
    pub const MS: BitField<u8> = BitField::new(0b0000_0011, 0, 0b00);

    pub const MA_1: u8 = 0b00;
    pub const MA_2: u8 = 0b01;
    pub const MA_4: u8 = 0b10;
    pub const MA_8: u8 = 0b11;

    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum SamplesAveraged {
        One = MA_1,
        Two = MA_2,
        Four = MA_4,
        Eight = MA_8,
    }
    impl_try_from_u8!(SamplesAveraged { One, Two, Four, Eight });

    pub const DO_0_75: u8 = 0b000;
    pub const DO_1_5: u8 = 0b001;
    pub const DO_3: u8 = 0b010;
    pub const DO_7_5: u8 = 0b011;
    pub const DO_15: u8 = 0b100;
    pub const DO_30: u8 = 0b101;
    pub const DO_75: u8 = 0b110;
    /// Not a valid rate.
    pub const DO_RESERVED: u8 = 0b111;

    /// Continuous mode output rates. Faster rates, up to 160 Hz, come from
    /// triggering single measurements off the DRDY pin.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum DataOutputRate {
        Hz0_75 = DO_0_75,
        Hz1_5 = DO_1_5,
        Hz3 = DO_3,
        Hz7_5 = DO_7_5,
        Hz15 = DO_15,
        Hz30 = DO_30,
        Hz75 = DO_75,
    }
    impl_try_from_u8!(DataOutputRate { Hz0_75, Hz1_5, Hz3, Hz7_5, Hz15, Hz30, Hz75 });

    pub const MS_NORMAL: u8 = 0b00;
    pub const MS_POSITIVE: u8 = 0b01;
    pub const MS_NEGATIVE: u8 = 0b10;
    /// Undefined.
    pub const MS_RESERVED: u8 = 0b11;

    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum MeasurementMode {
        /// Bias pins float, normal measurement flow.
        Normal = MS_NORMAL,
        /// Positive current forced across the resistive load on all axes.
        Positive = MS_POSITIVE,
        /// Negative current forced across the resistive load on all axes.
        Negative = MS_NEGATIVE,
    }
    impl_try_from_u8!(MeasurementMode { Normal, Positive, Negative });

    pub const FIELDS: [BitField<u8>; 4] = [CRA7, MA, DO, MS];
}

pub mod config_b {
    use super::BitField;

    /// Gain, shared by all three channels.
    pub const GN: BitField<u8> = BitField::new(0b1110_0000, 5, 0b001);
    pub const RESERVED: BitField<u8> = BitField::new(0b0001_1111, 0, 0b00000);

    pub const GN_1370: u8 = 0b000;
    pub const GN_1090: u8 = 0b001;
    pub const GN_820: u8 = 0b010;
    pub const GN_660: u8 = 0b011;
    pub const GN_440: u8 = 0b100;
    pub const GN_390: u8 = 0b101;
    pub const GN_330: u8 = 0b110;
    pub const GN_230: u8 = 0b111;

    /// Gain settings, named by their LSb/Gauss value.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Gain {
        Gain1370 = GN_1370,
        Gain1090 = GN_1090,
        Gain820 = GN_820,
        Gain660 = GN_660,
        Gain440 = GN_440,
        Gain390 = GN_390,
        Gain330 = GN_330,
        Gain230 = GN_230,
    }
    impl_try_from_u8!(Gain {
        Gain1370, Gain1090, Gain820, Gain660, Gain440, Gain390, Gain330, Gain230
    });

    /// One row of the datasheet gain table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct GainScale {
        /// Sensor field range, +/- milli-gauss.
        pub range_mg: u16,
        pub lsb_per_gauss: u16,
        /// Digital resolution in micro-gauss per LSb.
        pub resolution_ug: u16,
    }

    /// Indexed by the GN field value.
    pub const GAIN_TABLE: [GainScale; 8] = [
        GainScale { range_mg: 880, lsb_per_gauss: 1370, resolution_ug: 730 },
        GainScale { range_mg: 1300, lsb_per_gauss: 1090, resolution_ug: 920 },
        GainScale { range_mg: 1900, lsb_per_gauss: 820, resolution_ug: 1220 },
        GainScale { range_mg: 2500, lsb_per_gauss: 660, resolution_ug: 1520 },
        GainScale { range_mg: 4000, lsb_per_gauss: 440, resolution_ug: 2270 },
        GainScale { range_mg: 4700, lsb_per_gauss: 390, resolution_ug: 2560 },
        GainScale { range_mg: 5600, lsb_per_gauss: 330, resolution_ug: 3030 },
        GainScale { range_mg: 8100, lsb_per_gauss: 230, resolution_ug: 4350 },
    ];

    impl Gain {
        pub const fn scale(self) -> GainScale {
            GAIN_TABLE[self as usize]
        }
    }

    pub const FIELDS: [BitField<u8>; 2] = [GN, RESERVED];
}

pub mod mode {
    use super::BitField;

    /// High speed I2C, 3400 kHz.
    pub const HS: BitField<u8> = BitField::new(0b1000_0000, 7, 0b0);
    pub const UNUSED: BitField<u8> = BitField::new(0b0111_1100, 2, 0b00000);
    pub const MD: BitField<u8> = BitField::new(0b0000_0011, 0, 0b01);

    pub const MD_CONTINUOUS: u8 = 0b00;
    pub const MD_SINGLE: u8 = 0b01;
    pub const MD_IDLE_1: u8 = 0b10;
    pub const MD_IDLE_2: u8 = 0b11;

    /// Operating mode.
    ///
    /// In continuous mode the first full set of outputs shows up 2/fDO after
    /// power on or after a write to the mode or configuration registers,
    /// then every 1/fDO. RDY goes high once all three axes hold new data.
    ///
    /// In single mode the device measures once, sets RDY and drops back to
    /// idle, so reading the mode register afterwards shows an idle value.
    /// The result stays put until the outputs are read or another
    /// measurement runs.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum OperatingMode {
        Continuous = MD_CONTINUOUS,
        Single = MD_SINGLE,
        Idle1 = MD_IDLE_1,
        Idle2 = MD_IDLE_2,
    }
    impl_try_from_u8!(OperatingMode { Continuous, Single, Idle1, Idle2 });

    pub const FIELDS: [BitField<u8>; 3] = [HS, UNUSED, MD];
}

/// Shared by the X, Z and Y output registers.
pub mod data_output {
    use super::BitField;

    /// Whole register, 2's complement.
    pub const VALUE: BitField<u16> = BitField::new(0xFFFF, 0, 0);

    pub const MIN_RAW: u16 = 0xF800;
    pub const MAX_RAW: u16 = 0x07FF;
    pub const MIN: i16 = -2048;
    pub const MAX: i16 = 2047;
    /// Written to an axis when its ADC over- or underflows, until the next
    /// valid measurement.
    pub const OVERFLOW: i16 = -4096;

    pub const FIELDS: [BitField<u16>; 1] = [VALUE];
}

pub mod status {
    use super::BitField;

    pub const RESERVED: BitField<u8> = BitField::new(0b1111_1100, 2, 0b000000);
    /// Data output registers locked. Set once some but not all six output
    /// bytes have been read, or the mode register has been read. Released
    /// when all six bytes are read, the mode or configuration A register
    /// changes, or power is cycled.
    pub const LOCK: BitField<u8> = BitField::new(0b0000_0010, 1, 0b0);
    /// Data ready. Set when all six output bytes hold new data, cleared
    /// while the device writes them and held clear for 250 us.
    pub const RDY: BitField<u8> = BitField::new(0b0000_0001, 0, 0b0);

    pub const FIELDS: [BitField<u8>; 3] = [RESERVED, LOCK, RDY];
}

pub mod identification {
    use super::BitField;

    /// Reads back ASCII "H43".
    pub const VALUE: BitField<u32> = BitField::new(0x00FF_FFFF, 0, 0x0048_3433);

    pub const FIELDS: [BitField<u32>; 1] = [VALUE];
}
