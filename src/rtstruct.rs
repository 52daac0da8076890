//! Assembly of the complete RT-STRUCT file dataset.

use dicom::core::{DataElement, VR};
use dicom::dicom_value;
use dicom::dictionary_std::tags;
use dicom::dictionary_std::uids;
use dicom::object::{DefaultDicomObject, FileDicomObject, InMemDicomObject};
use thiserror::Error;
use tracing::debug;

use crate::meta::{build_file_meta, FileMetaError};
use crate::metadata::{apply_metadata, ApplyError};
use crate::types::UI;
use crate::uid::generate_uid;

/// An RT-STRUCT file dataset with its embedded file meta group.
pub type RtStruct = DefaultDicomObject;

/// Errors that can occur while assembling an RT-STRUCT dataset.
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("no reference dataset was supplied")]
	NoReferenceDataset,
	#[error(transparent)]
	FileMeta(#[from] FileMetaError),
	#[error(transparent)]
	Apply(#[from] ApplyError),
}

/// Assembles an RT-STRUCT dataset derived from the given reference images.
///
/// The SOP class is fixed to RT Structure Set Storage and a fresh SOP
/// instance UID is stamped into both the file meta group and the dataset
/// body. Identifying metadata is taken from the first reference dataset;
/// additional references are currently ignored.
///
/// The returned object is ready for standard DICOM encoding: `write_all`
/// emits the all-zero 128-byte preamble, the Explicit VR meta group and the
/// Implicit VR Little Endian data set.
pub fn make_rtstruct(references: &[InMemDicomObject]) -> Result<RtStruct, BuildError> {
	let reference = references.first().ok_or(BuildError::NoReferenceDataset)?;

	let sop_class_uid = UI::from(uids::RT_STRUCTURE_SET_STORAGE);
	let sop_instance_uid = generate_uid();

	let meta = build_file_meta(&sop_class_uid, &sop_instance_uid)?;
	let mut rtstruct = FileDicomObject::new_empty_with_meta(meta);

	rtstruct.put(DataElement::new(
		tags::SOP_CLASS_UID,
		VR::UI,
		dicom_value!(Str, sop_class_uid),
	));
	rtstruct.put(DataElement::new(
		tags::SOP_INSTANCE_UID,
		VR::UI,
		dicom_value!(Str, sop_instance_uid.clone()),
	));

	apply_metadata(&mut rtstruct, reference)?;

	debug!(%sop_instance_uid, "Assembled RT-STRUCT dataset");
	Ok(rtstruct)
}

#[cfg(test)]
mod tests {
	use super::*;
	use dicom::object::Tag;

	fn reference_dataset(patient_id: &str) -> InMemDicomObject {
		InMemDicomObject::from_element_iter([
			DataElement::new(tags::PATIENT_ID, VR::LO, dicom_value!(Str, patient_id)),
			DataElement::new(tags::PATIENT_NAME, VR::PN, dicom_value!(Str, "MUSTERMANN^MAX")),
			DataElement::new(tags::PATIENT_BIRTH_DATE, VR::DA, dicom_value!(Str, "19700101")),
			DataElement::new(tags::PATIENT_SEX, VR::CS, dicom_value!(Str, "M")),
			DataElement::new(tags::STUDY_DATE, VR::DA, dicom_value!(Str, "20240105")),
			DataElement::new(tags::STUDY_TIME, VR::TM, dicom_value!(Str, "101530")),
			DataElement::new(tags::ACCESSION_NUMBER, VR::SH, dicom_value!(Str, "ACC001")),
			DataElement::new(
				tags::REFERRING_PHYSICIAN_NAME,
				VR::PN,
				dicom_value!(Str, "DOE^JANE"),
			),
			DataElement::new(
				tags::STUDY_INSTANCE_UID,
				VR::UI,
				dicom_value!(Str, "1.2.840.113619.2.1.1"),
			),
			DataElement::new(tags::STUDY_ID, VR::SH, dicom_value!(Str, "STUDY01")),
		])
	}

	fn str_value(obj: &InMemDicomObject, tag: Tag) -> String {
		obj.element(tag).unwrap().to_str().unwrap().into_owned()
	}

	#[test]
	fn modality_is_always_rtstruct() {
		let rtstruct = make_rtstruct(&[reference_dataset("12345")]).unwrap();
		let modality = str_value(&rtstruct, tags::MODALITY);
		assert!(!modality.is_empty());
		assert_eq!(modality, "RTSTRUCT");
	}

	#[test]
	fn patient_id_is_copied_verbatim() {
		let rtstruct = make_rtstruct(&[reference_dataset("12345")]).unwrap();
		assert_eq!(str_value(&rtstruct, tags::PATIENT_ID), "12345");
	}

	#[test]
	fn sop_identifiers_agree_between_meta_and_dataset() {
		let rtstruct = make_rtstruct(&[reference_dataset("12345")]).unwrap();

		assert_eq!(
			rtstruct.meta().media_storage_sop_class_uid(),
			uids::RT_STRUCTURE_SET_STORAGE
		);
		assert_eq!(
			str_value(&rtstruct, tags::SOP_CLASS_UID),
			uids::RT_STRUCTURE_SET_STORAGE
		);
		assert_eq!(
			rtstruct.meta().media_storage_sop_instance_uid(),
			str_value(&rtstruct, tags::SOP_INSTANCE_UID)
		);
	}

	#[test]
	fn generated_identifiers_differ_across_invocations() {
		let reference = reference_dataset("12345");
		let first = make_rtstruct(std::slice::from_ref(&reference)).unwrap();
		let second = make_rtstruct(std::slice::from_ref(&reference)).unwrap();

		assert_ne!(
			first.meta().media_storage_sop_instance_uid(),
			second.meta().media_storage_sop_instance_uid()
		);
		assert_ne!(
			str_value(&first, tags::SERIES_INSTANCE_UID),
			str_value(&second, tags::SERIES_INSTANCE_UID)
		);
		assert_ne!(
			str_value(&first, tags::FRAME_OF_REFERENCE_UID),
			str_value(&second, tags::FRAME_OF_REFERENCE_UID)
		);
	}

	#[test]
	fn only_the_first_reference_is_used() {
		let rtstruct =
			make_rtstruct(&[reference_dataset("12345"), reference_dataset("67890")]).unwrap();
		assert_eq!(str_value(&rtstruct, tags::PATIENT_ID), "12345");
	}

	#[test]
	fn empty_reference_collection_is_rejected() {
		let err = make_rtstruct(&[]).unwrap_err();
		assert!(matches!(err, BuildError::NoReferenceDataset));
	}

	#[test]
	fn missing_reference_attribute_propagates() {
		let mut reference = reference_dataset("12345");
		reference.remove_element(tags::STUDY_INSTANCE_UID);

		let err = make_rtstruct(&[reference]).unwrap_err();
		assert!(matches!(
			err,
			BuildError::Apply(ApplyError::MissingAttribute(tag)) if tag == tags::STUDY_INSTANCE_UID
		));
	}

	#[test]
	fn dataset_round_trips_through_the_encoder() {
		let rtstruct = make_rtstruct(&[reference_dataset("12345")]).unwrap();

		let mut encoded = Vec::new();
		rtstruct.write_all(&mut encoded).unwrap();

		// 128-byte preamble, all zero, followed by the magic code.
		assert!(encoded.len() > 132);
		assert!(encoded[..128].iter().all(|&b| b == 0));
		assert_eq!(&encoded[128..132], b"DICM");

		let decoded = dicom::object::from_reader(&encoded[128..]).unwrap();
		assert_eq!(str_value(&decoded, tags::PATIENT_ID), "12345");
		assert_eq!(str_value(&decoded, tags::MODALITY), "RTSTRUCT");
	}
}
