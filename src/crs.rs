use std::fmt;

/// A coordinate reference system identified by its EPSG code, written as `epsg:<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs {
    epsg: u32,
}

impl Crs {
    pub fn from_epsg(epsg: u32) -> Self { Self { epsg } }

    #[inline] pub fn epsg(&self) -> u32 { self.epsg }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epsg:{}", self.epsg)
    }
}
