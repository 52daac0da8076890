//! Population of RT-STRUCT metadata from a reference image.
//!
//! The attribute layout follows the RT Structure Set IOD:
//! <https://dicom.innolitics.com/ciods/rt-struct/>

use chrono::{DateTime, Local};
use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dicom_value;
use dicom::dictionary_std::tags;
use dicom::object::{InMemDicomObject, Tag};
use thiserror::Error;
use tracing::trace;

use crate::types::Modality;
use crate::uid::generate_uid;
use crate::SOFTWARE_VERSIONS;

/// DA (Date) encoding: 8-digit calendar date.
const DA_FORMAT: &str = "%Y%m%d";
/// TM (Time) encoding: 6-digit time with a microsecond fraction.
const TM_FORMAT: &str = "%H%M%S%.6f";

/// Patient-layer attributes copied verbatim from the reference dataset.
const PATIENT_ATTRIBUTES: &[Tag] = &[
	tags::PATIENT_ID,
	tags::PATIENT_NAME,
	tags::PATIENT_BIRTH_DATE,
	tags::PATIENT_SEX,
];

/// Study-layer attributes copied verbatim from the reference dataset.
const STUDY_ATTRIBUTES: &[Tag] = &[
	tags::STUDY_DATE,
	tags::STUDY_TIME,
	tags::ACCESSION_NUMBER,
	tags::REFERRING_PHYSICIAN_NAME,
	tags::STUDY_INSTANCE_UID,
	tags::STUDY_ID,
];

/// Attributes that are always written with an empty default value.
const DEFAULT_ATTRIBUTES: &[(Tag, VR)] = &[
	(tags::OPERATORS_NAME, VR::PN),
	(tags::SERIES_NUMBER, VR::IS),
	(tags::POSITION_REFERENCE_INDICATOR, VR::LO),
	(tags::MANUFACTURER, VR::LO),
];

/// Errors that can occur while applying reference metadata.
#[derive(Debug, Error)]
pub enum ApplyError {
	#[error("missing required attribute {0} in reference dataset")]
	MissingAttribute(Tag),
}

/// Copies the identifying metadata of `reference` onto `rtstruct` and stamps
/// fresh series/frame-of-reference identifiers and timestamps.
///
/// Every attribute written here is either copied verbatim from the reference
/// dataset or freshly derived from the current wall-clock time. The reference
/// dataset is never mutated.
pub fn apply_metadata(
	rtstruct: &mut InMemDicomObject,
	reference: &InMemDicomObject,
) -> Result<(), ApplyError> {
	// Patient and study layers
	for &tag in PATIENT_ATTRIBUTES.iter().chain(STUDY_ATTRIBUTES) {
		let element = reference
			.get(tag)
			.ok_or(ApplyError::MissingAttribute(tag))?;
		rtstruct.put(element.clone());
	}

	// Absence-tolerant copy: a missing study description maps to an empty value.
	if let Some(element) = reference.get(tags::STUDY_DESCRIPTION) {
		rtstruct.put(element.clone());
	} else {
		rtstruct.put(DataElement::new(
			tags::STUDY_DESCRIPTION,
			VR::LO,
			PrimitiveValue::Empty,
		));
	}

	// Series and instance layers share a single wall-clock sample.
	let now: DateTime<Local> = Local::now();
	let date = now.format(DA_FORMAT).to_string();
	let time = now.format(TM_FORMAT).to_string();

	let series_instance_uid = generate_uid();
	rtstruct.put(DataElement::new(
		tags::SERIES_DATE,
		VR::DA,
		dicom_value!(Str, date.clone()),
	));
	rtstruct.put(DataElement::new(
		tags::SERIES_TIME,
		VR::TM,
		dicom_value!(Str, time.clone()),
	));
	rtstruct.put(DataElement::new(
		tags::MODALITY,
		VR::CS,
		PrimitiveValue::from(Modality::RtStruct),
	));
	rtstruct.put(DataElement::new(
		tags::SERIES_INSTANCE_UID,
		VR::UI,
		dicom_value!(Str, series_instance_uid.clone()),
	));

	// Frame of reference module
	let frame_of_reference_uid = generate_uid();
	rtstruct.put(DataElement::new(
		tags::FRAME_OF_REFERENCE_UID,
		VR::UI,
		dicom_value!(Str, frame_of_reference_uid.clone()),
	));

	// Instance layer
	rtstruct.put(DataElement::new(
		tags::INSTANCE_CREATION_DATE,
		VR::DA,
		dicom_value!(Str, date),
	));
	rtstruct.put(DataElement::new(
		tags::INSTANCE_CREATION_TIME,
		VR::TM,
		dicom_value!(Str, time),
	));

	// General equipment module
	rtstruct.put(DataElement::new(
		tags::SOFTWARE_VERSIONS,
		VR::LO,
		dicom_value!(Str, String::from(SOFTWARE_VERSIONS)),
	));
	for &(tag, vr) in DEFAULT_ATTRIBUTES {
		rtstruct.put(DataElement::new(tag, vr, PrimitiveValue::Empty));
	}

	trace!(
		%series_instance_uid,
		%frame_of_reference_uid,
		"Applied reference metadata"
	);
	Ok(())
}
