use dicom_core::dictionary::DataDictionary;
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::InMemDicomObject;

// Image Geometry Tags
pub const FIELD_OF_VIEW_DIMENSIONS: Tag = Tag(0x0018, 0x1149);

// Identification Tags
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);

/// Resolves a tag name to a DICOM tag
///
/// Accepts dictionary keywords (`PatientID`) as well as tag literals
/// (`(0010,0020)`, `0010,0020`, `00100020`).
pub fn resolve_tag(name: &str) -> Option<Tag> {
    StandardDataDictionary.parse_tag(name.trim())
}

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get multi-valued floating point value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<f64>
pub fn get_multi_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float64().ok())
}
