/// Meaning of a sample's flag value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFlag {
    /// `-1`: first point of a polyline traced backwards.
    BeginBackward,
    /// `0`: sample is not part of any polyline.
    Skip,
    /// `1`: first point of a polyline traced forwards.
    BeginForward,
    /// `2`: interior point.
    Interior,
    /// `3`: last point, closes the polyline.
    End,
}

impl TryFrom<i32> for SampleFlag {
    type Error = i32;

    fn try_from(flag: i32) -> Result<Self, Self::Error> {
        match flag {
            -1 => Ok(Self::BeginBackward),
            0 => Ok(Self::Skip),
            1 => Ok(Self::BeginForward),
            2 => Ok(Self::Interior),
            3 => Ok(Self::End),
            other => Err(other),
        }
    }
}

impl SampleFlag {
    /// Flags that mark a polyline boundary and must never repeat back to back.
    pub fn is_boundary(self) -> bool {
        matches!(self, Self::BeginBackward | Self::BeginForward | Self::End)
    }
}
