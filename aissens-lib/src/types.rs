use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;

/// Packet-type codes from the AISSENS data-type table.
///
/// | Number (base10) | Data type               |
/// |-----------------|-------------------------|
/// | 0               | Raw data                |
/// | 1               | FFT data                |
/// | 2               | Feature                 |
/// | 3               | Battery                 |
/// | 4               | Hibernate               |
/// | 5               | Real time raw data      |
/// | 6               | Real time FFT           |
/// | 71, 72          | Raw data + FFT          |
/// | 81, 82          | Raw time raw data + FFT |
/// | 9               | OA only                 |
/// | 10              | Real time OA only       |
/// | 11              | Ask command             |
/// | 12 ~ 255        | Reserved                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum DataType {
    #[strum(to_string = "Raw data")]
    RawData = 0,
    #[strum(to_string = "FFT data")]
    FftData = 1,
    #[strum(to_string = "Feature")]
    Feature = 2,
    #[strum(to_string = "Battery")]
    Battery = 3,
    #[strum(to_string = "Hibernate")]
    Hibernate = 4,
    #[strum(to_string = "Real time raw data")]
    RealTimeRawData = 5,
    #[strum(to_string = "Real time FFT")]
    RealTimeFft = 6,
    #[strum(to_string = "Raw data + FFT")]
    RawDataFft = 71,
    #[strum(to_string = "Raw data + FFT")]
    RawDataFftAlt = 72,
    #[strum(to_string = "Raw time raw data + FFT")]
    RawTimeRawDataFft = 81,
    #[strum(to_string = "Raw time raw data + FFT")]
    RawTimeRawDataFftAlt = 82,
    #[strum(to_string = "OA only")]
    OaOnly = 9,
    #[strum(to_string = "Real time OA only")]
    RealTimeOaOnly = 10,
    #[strum(to_string = "Ask command")]
    AskCommand = 11,

    #[strum(to_string = "Reserved")]
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl DataType {
    /// Packet families that carry FFT sample series (codes 1, 6, 71, 72).
    pub fn is_fft_family(self) -> bool {
        matches!(
            self,
            DataType::FftData | DataType::RealTimeFft | DataType::RawDataFft | DataType::RawDataFftAlt
        )
    }

    /// Packet families that carry only the overall-acceleration summary
    /// (codes 9, 10).
    pub fn is_oa_family(self) -> bool {
        matches!(self, DataType::OaOnly | DataType::RealTimeOaOnly)
    }
}
