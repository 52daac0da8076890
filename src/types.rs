use dicom::core::PrimitiveValue;
use std::fmt::{Display, Formatter};

/// UI (Unique Identifier) value representation.
pub type UI = String;

/// UL (Unsigned Long) value representation.
pub type UL = u32;

/// Modality (0008,0060) values written by this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modality {
	RtStruct,
}

impl Display for Modality {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::RtStruct => write!(f, "RTSTRUCT"),
		}
	}
}

impl From<Modality> for PrimitiveValue {
	fn from(modality: Modality) -> Self {
		Self::Str(modality.to_string())
	}
}
