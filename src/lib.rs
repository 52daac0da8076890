//! Generation of minimal RT-STRUCT DICOM objects.
//!
//! An RT-STRUCT (RT Structure Set) is a DICOM document type describing
//! radiotherapy structure sets defined on an image series. This crate
//! assembles the metadata shell of such a document: it copies the
//! patient/study identifying attributes from a reference image, stamps fresh
//! series/instance identifiers and timestamps, and builds a conformant file
//! meta group. Encoding and decoding of DICOM streams is entirely delegated
//! to the `dicom` crate.
//!
//! Structure-set body content (regions of interest, contour sequences) is
//! not produced.
//!
//! ```no_run
//! use dicom::object::open_file;
//! use dicom_rtstruct::make_rtstruct;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reference = open_file("ct_slice.dcm")?.into_inner();
//! let rtstruct = make_rtstruct(&[reference])?;
//! rtstruct.write_all(&mut std::fs::File::create("rtstruct.dcm")?)?;
//! # Ok(())
//! # }
//! ```

pub mod meta;
pub mod metadata;
pub mod rtstruct;
pub mod types;
pub mod uid;

pub use crate::meta::{build_file_meta, FileMetaError};
pub use crate::metadata::{apply_metadata, ApplyError};
pub use crate::rtstruct::{make_rtstruct, BuildError, RtStruct};

/// The implementation class UID for dicom-rtstruct.
/// The UID is a randomly generated UUID represented as a single integer value under the 2.25 root.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.305828736130597654316268136038169751918";

/// The implementation version name for dicom-rtstruct.
/// Limited to 16 characters by the SH value representation of
/// Implementation Version Name (0002,0013).
pub const IMPLEMENTATION_VERSION_NAME: &str = concat!("RTSTRUCT ", env!("CARGO_PKG_VERSION"));

/// Value for Software Versions (0018,1020) in the general equipment layer.
/// It consists of the string "dicom-rtstruct" followed by the crate version.
pub const SOFTWARE_VERSIONS: &str = concat!("dicom-rtstruct ", env!("CARGO_PKG_VERSION"));
