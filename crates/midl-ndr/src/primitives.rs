//! NDR primitive type implementations
//!
//! | Type | Size | Alignment |
//! |------|------|-----------|
//! | u8/i8 | 1 | 1 |
//! | u16/i16 | 2 | 2 |
//! | u32/i32/f32 | 4 | 4 |
//! | u64/i64/f64 | 8 | 8 |
//! | GUID | 16 | 4 |
//!
//! A GUID is written as `Data1` (u32), `Data2` (u16), `Data3` (u16) in the
//! stream byte order followed by the 8 raw bytes of `Data4`.

use crate::{NdrDecode, NdrEncode, NdrReader, NdrWriter, Result};
use uuid::Uuid;

macro_rules! ndr_scalar {
    ($ty:ty, $size:expr, $write:ident, $read:ident) => {
        impl NdrEncode for $ty {
            fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
                w.$write(*self);
                Ok(())
            }
        }

        impl NdrDecode for $ty {
            const NDR_MIN_SIZE: usize = $size;

            fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
                r.$read()
            }
        }
    };
}

ndr_scalar!(u8, 1, write_u8, read_u8);
ndr_scalar!(i8, 1, write_i8, read_i8);
ndr_scalar!(u16, 2, write_u16, read_u16);
ndr_scalar!(i16, 2, write_i16, read_i16);
ndr_scalar!(u32, 4, write_u32, read_u32);
ndr_scalar!(i32, 4, write_i32, read_i32);
ndr_scalar!(u64, 8, write_u64, read_u64);
ndr_scalar!(i64, 8, write_i64, read_i64);
ndr_scalar!(f32, 4, write_f32, read_f32);
ndr_scalar!(f64, 8, write_f64, read_f64);

impl NdrEncode for Uuid {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        let (data1, data2, data3, data4) = self.as_fields();
        w.write_u32(data1);
        w.write_u16(data2);
        w.write_u16(data3);
        w.write_bytes(data4);
        Ok(())
    }
}

impl NdrDecode for Uuid {
    const NDR_MIN_SIZE: usize = 16;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        let data1 = r.read_u32()?;
        let data2 = r.read_u16()?;
        let data3 = r.read_u16()?;
        let data4: [u8; 8] = r.read_fixed()?;
        Ok(Uuid::from_fields(data1, data2, data3, &data4))
    }
}
