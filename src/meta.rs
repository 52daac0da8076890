//! Construction of the DICOM file meta information group.

use dicom::dictionary_std::uids;
use dicom::object::{FileMetaTable, FileMetaTableBuilder};
use thiserror::Error;
use tracing::trace;

use crate::types::UL;
use crate::{IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME};

/// Encoded size of the File Meta Information Group Length (0002,0000) element.
/// The element has a fixed 4-byte UL value, so its Explicit VR encoding is
/// always 12 bytes: tag (4) + VR (2) + length (2) + value (4).
const GROUP_LENGTH_ELEMENT_SIZE: UL = 12;

/// Errors that can occur while building the file meta group.
#[derive(Debug, Error)]
pub enum FileMetaError {
	/// The assembled meta group does not conform to the file meta encoding
	/// rules (e.g. a required element is missing or malformed).
	#[error("file meta group failed conformance validation: {source}")]
	Validation {
		source: Box<dyn std::error::Error + Send + Sync>,
	},
	/// The meta group could not be encoded into the measurement buffer.
	#[error("failed to encode file meta group: {source}")]
	Encode {
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}

/// Builds the file meta group for a media storage SOP class/instance pair.
///
/// The transfer syntax for the data set is fixed to Implicit VR Little
/// Endian; the meta group itself is always encoded as Explicit VR Little
/// Endian, as required by PS3.10.
///
/// The group length can only be known once every other meta element has been
/// encoded, so the group is serialized into a transient buffer first and the
/// measured length is patched into the table afterwards.
pub fn build_file_meta(
	sop_class_uid: &str,
	sop_instance_uid: &str,
) -> Result<FileMetaTable, FileMetaError> {
	let mut meta = FileMetaTableBuilder::new()
		.information_version([0x00, 0x01])
		.media_storage_sop_class_uid(sop_class_uid)
		.media_storage_sop_instance_uid(sop_instance_uid)
		.implementation_class_uid(IMPLEMENTATION_CLASS_UID)
		.implementation_version_name(IMPLEMENTATION_VERSION_NAME)
		.transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
		.build()
		.map_err(|err| FileMetaError::Validation {
			source: Box::new(err),
		})?;

	let mut buffer = Vec::new();
	meta.write(&mut buffer).map_err(|err| FileMetaError::Encode {
		source: Box::new(err),
	})?;

	// The writer emits the "DICM" magic code ahead of the group elements.
	// The magic code is not part of the meta group and must not be measured.
	let encoded = buffer.strip_prefix(b"DICM").unwrap_or(&buffer);
	meta.information_group_length = encoded.len() as UL - GROUP_LENGTH_ELEMENT_SIZE;
	trace!(
		group_length = meta.information_group_length,
		"Built file meta group"
	);

	Ok(meta)
}
