//! Descriptor-driven request encoding and reply validation
//!
//! Every extension control follows the same exchange:
//!
//! ```text
//! request  [0x00] [group] [opcode] [param bytes ...] [0x00 ...]
//! response [group] [opcode] [payload 2..6] [status] [ ... ]
//! ```
//!
//! A [`Descriptor`] captures everything that differs between operations:
//! the opcode, whether it is a set or a get (which picks the status codes),
//! where each parameter goes in the request and where each result value sits
//! in the reply. [`encode`] and [`decode`] are the only places that touch
//! report bytes.
//!
//! Descriptors are only built inside this crate, in [`crate::descriptor`],
//! where every entry is checked at compile time to fit the report.

use seecam_transport::protocol::{self, Report, BUFFER_LENGTH};
use serde::Serialize;
use tracing::warn;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::error::{CameraError, Mismatch};
use crate::protocol::{cmd, request, response, status, CAMERA_CONTROL_CU30};

// =============================================================================
// Field layout
// =============================================================================

/// Width and byte order of a single value inside a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    /// 32-bit, most significant byte first
    U32Be,
}

impl Width {
    pub const fn len(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U32Be => 4,
        }
    }
}

/// A named value at a fixed report offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    offset: usize,
    width: Width,
}

impl Field {
    pub(crate) const fn u8(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            width: Width::U8,
        }
    }

    pub(crate) const fn u32_be(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            width: Width::U32Be,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Absolute offset in the report
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Store `value`, truncated to the field width
    fn write(&self, report: &mut Report, value: u32) {
        match self.width {
            Width::U8 => report[self.offset] = value as u8,
            Width::U32Be => {
                report[self.offset..self.offset + 4].copy_from_slice(&value.to_be_bytes())
            }
        }
    }

    fn read(&self, report: &Report) -> u32 {
        match self.width {
            Width::U8 => u32::from(report[self.offset]),
            Width::U32Be => u32::from_be_bytes([
                report[self.offset],
                report[self.offset + 1],
                report[self.offset + 2],
                report[self.offset + 3],
            ]),
        }
    }
}

// =============================================================================
// Descriptors
// =============================================================================

/// Whether an operation writes or reads a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpKind {
    Set,
    Get,
}

/// Static metadata for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    name: &'static str,
    group: u8,
    opcode: u8,
    kind: OpKind,
    /// Status byte meaning success
    success: u8,
    /// Status byte meaning the device refused
    failure: u8,
    /// Request parameters, in the order callers supply values
    params: &'static [Field],
    /// Reply values, in the order [`Payload`] exposes them
    payload: &'static [Field],
}

impl Descriptor {
    /// Set operation in the CU30 control group
    pub(crate) const fn set(opcode: u8, params: &'static [Field]) -> Self {
        Self {
            name: cmd::name(opcode),
            group: CAMERA_CONTROL_CU30,
            opcode,
            kind: OpKind::Set,
            success: status::SET_SUCCESS,
            failure: status::SET_FAIL,
            params,
            payload: &[],
        }
    }

    /// Get operation in the CU30 control group
    pub(crate) const fn get(opcode: u8, payload: &'static [Field]) -> Self {
        Self {
            name: cmd::name(opcode),
            group: CAMERA_CONTROL_CU30,
            opcode,
            kind: OpKind::Get,
            success: status::GET_SUCCESS,
            failure: status::GET_FAIL,
            params: &[],
            payload,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn success(&self) -> u8 {
        self.success
    }

    pub fn failure(&self) -> u8 {
        self.failure
    }

    pub fn params(&self) -> &'static [Field] {
        self.params
    }

    pub fn payload(&self) -> &'static [Field] {
        self.payload
    }

    /// Check that every field fits in the report and clears the header bytes
    pub(crate) const fn is_well_formed(&self) -> bool {
        let mut i = 0;
        while i < self.params.len() {
            let f = self.params[i];
            if f.offset < request::PARAMS || f.offset + f.width.len() > BUFFER_LENGTH {
                return false;
            }
            i += 1;
        }
        let mut i = 0;
        while i < self.payload.len() {
            let f = self.payload[i];
            if f.offset < response::PAYLOAD || f.offset + f.width.len() > response::STATUS {
                return false;
            }
            i += 1;
        }
        true
    }
}

// =============================================================================
// Reply header
// =============================================================================

/// Leading bytes of every reply
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ResponseHeader {
    pub group: u8,
    pub opcode: u8,
    pub payload: [u8; 4],
    pub status: u8,
}

const HEADER_LEN: usize = response::STATUS + 1;

/// A whole reply report viewed as header plus trailing bytes
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct ReplyLayout {
    header: ResponseHeader,
    _rest: [u8; BUFFER_LENGTH - HEADER_LEN],
}

const _: () = assert!(std::mem::size_of::<ResponseHeader>() == HEADER_LEN);
const _: () = assert!(std::mem::size_of::<ReplyLayout>() == BUFFER_LENGTH);

impl ResponseHeader {
    pub fn parse(report: &Report) -> &Self {
        let layout: &ReplyLayout = zerocopy::transmute_ref!(report);
        &layout.header
    }
}

// =============================================================================
// Encode / decode
// =============================================================================

/// Decoded reply values, ordered as in [`Descriptor::payload`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    values: Vec<u32>,
}

impl Payload {
    /// Value at `index`, or 0 when the descriptor declares fewer fields
    pub fn value(&self, index: usize) -> u32 {
        self.values.get(index).copied().unwrap_or_default()
    }

    /// Low byte of the value at `index`
    pub fn byte(&self, index: usize) -> u8 {
        self.value(index) as u8
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the request report for `desc`
///
/// The report starts zeroed; only the header and the declared parameter
/// fields are written. Values pair with `desc.params()` positionally; missing
/// values leave their field zero and extra values are ignored.
pub fn encode(desc: &Descriptor, params: &[u32]) -> Report {
    let mut report = protocol::zeroed();
    report[request::GROUP] = desc.group;
    report[request::OPCODE] = desc.opcode;
    for (field, &value) in desc.params.iter().zip(params) {
        field.write(&mut report, value);
    }
    report
}

/// Validate a reply against `desc` and extract its payload
///
/// Checks run in a fixed order and stop at the first failure: failure
/// status, control group echo, opcode echo, success status.
pub fn decode(desc: &Descriptor, reply: &Report) -> Result<Payload, CameraError> {
    let header = ResponseHeader::parse(reply);

    if header.status == desc.failure {
        warn!("{} rejected by device", desc.name);
        return Err(CameraError::DeviceRejected {
            command: desc.name,
            status: header.status,
        });
    }

    let mismatch = if header.group != desc.group {
        Some(Mismatch::ControlGroup {
            expected: desc.group,
            actual: header.group,
        })
    } else if header.opcode != desc.opcode {
        Some(Mismatch::OperationCode {
            expected: desc.opcode,
            actual: header.opcode,
        })
    } else if header.status != desc.success {
        Some(Mismatch::Status {
            expected: desc.success,
            actual: header.status,
        })
    } else {
        None
    };
    if let Some(mismatch) = mismatch {
        warn!("{}: {}", desc.name, mismatch);
        return Err(CameraError::ProtocolMismatch {
            command: desc.name,
            mismatch,
        });
    }

    Ok(Payload {
        values: desc.payload.iter().map(|f| f.read(reply)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET_WIDE: Descriptor = Descriptor::set(
        cmd::SET_EXPOSURE_COMPENSATION,
        &[Field::u32_be("value", 3)],
    );
    const GET_WIDE: Descriptor = Descriptor::get(
        cmd::GET_EXPOSURE_COMPENSATION,
        &[Field::u32_be("value", 2)],
    );

    fn reply(group: u8, opcode: u8, payload: [u8; 4], status: u8) -> Report {
        let mut r = protocol::zeroed();
        r[0] = group;
        r[1] = opcode;
        r[2..6].copy_from_slice(&payload);
        r[6] = status;
        r
    }

    #[test]
    fn test_encode_header_and_big_endian() {
        let req = encode(&SET_WIDE, &[0x1234_5678]);
        assert_eq!(req[0], 0);
        assert_eq!(req[1], CAMERA_CONTROL_CU30);
        assert_eq!(req[2], cmd::SET_EXPOSURE_COMPENSATION);
        assert_eq!(&req[3..7], &[0x12, 0x34, 0x56, 0x78]);
        assert!(req[7..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_truncates_u8_fields() {
        const D: Descriptor = Descriptor::set(cmd::SET_BURST_LENGTH, &[Field::u8("len", 3)]);
        let req = encode(&D, &[0x1_05]);
        assert_eq!(req[3], 0x05);
    }

    #[test]
    fn test_encode_missing_params_stay_zero() {
        const D: Descriptor = Descriptor::set(
            cmd::SET_FACE_DETECT_RECT,
            &[Field::u8("a", 3), Field::u8("b", 4), Field::u8("c", 5)],
        );
        let req = encode(&D, &[7]);
        assert_eq!(&req[3..6], &[7, 0, 0]);
    }

    #[test]
    fn test_decode_big_endian() {
        let r = reply(
            CAMERA_CONTROL_CU30,
            cmd::GET_EXPOSURE_COMPENSATION,
            [0x12, 0x34, 0x56, 0x78],
            status::GET_SUCCESS,
        );
        let payload = decode(&GET_WIDE, &r).unwrap();
        assert_eq!(payload.value(0), 0x1234_5678);
    }

    #[test]
    fn test_failure_status_wins_over_everything() {
        let r = reply(0xAB, 0xCD, [0xFF; 4], status::GET_FAIL);
        assert!(matches!(
            decode(&GET_WIDE, &r),
            Err(CameraError::DeviceRejected { status: 0x00, .. })
        ));
    }

    #[test]
    fn test_group_checked_before_opcode() {
        let r = reply(0xAB, 0xCD, [0; 4], status::GET_SUCCESS);
        match decode(&GET_WIDE, &r) {
            Err(CameraError::ProtocolMismatch { mismatch, .. }) => assert_eq!(
                mismatch,
                Mismatch::ControlGroup {
                    expected: CAMERA_CONTROL_CU30,
                    actual: 0xAB
                }
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_opcode_mismatch() {
        let r = reply(CAMERA_CONTROL_CU30, 0xCD, [0; 4], status::GET_SUCCESS);
        assert!(matches!(
            decode(&GET_WIDE, &r),
            Err(CameraError::ProtocolMismatch {
                mismatch: Mismatch::OperationCode { actual: 0xCD, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_ambiguous_status() {
        let r = reply(
            CAMERA_CONTROL_CU30,
            cmd::GET_EXPOSURE_COMPENSATION,
            [0; 4],
            0x5A,
        );
        assert!(matches!(
            decode(&GET_WIDE, &r),
            Err(CameraError::ProtocolMismatch {
                mismatch: Mismatch::Status { actual: 0x5A, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_set_descriptor_has_empty_payload() {
        let r = reply(
            CAMERA_CONTROL_CU30,
            cmd::SET_EXPOSURE_COMPENSATION,
            [1, 2, 3, 4],
            status::SET_SUCCESS,
        );
        assert!(decode(&SET_WIDE, &r).unwrap().is_empty());
    }

    #[test]
    fn test_well_formed_rejects_header_overlap() {
        const BAD: Descriptor = Descriptor::set(cmd::SET_DENOISE, &[Field::u8("x", 2)]);
        assert!(!BAD.is_well_formed());
        const BAD_REPLY: Descriptor = Descriptor::get(cmd::GET_DENOISE, &[Field::u32_be("x", 3)]);
        assert!(!BAD_REPLY.is_well_formed());
        assert!(GET_WIDE.is_well_formed());
    }

    #[test]
    fn test_table_entries_stay_inside_report() {
        for desc in crate::descriptor::ALL {
            assert!(desc.is_well_formed(), "{}", desc.name());
            let req = encode(desc, &[u32::MAX; 4]);
            assert_eq!(req[request::OPCODE], desc.opcode());

            let mut r = [0xFF; BUFFER_LENGTH];
            r[0] = desc.group();
            r[1] = desc.opcode();
            r[6] = desc.success();
            let payload = decode(desc, &r).unwrap();
            assert_eq!(payload.values().len(), desc.payload().len());
        }
    }

    #[test]
    fn test_header_view_of_full_report() {
        let mut r = reply(0x76, 0x10, [1, 2, 3, 4], 0x01);
        r[7..].fill(0xEE);
        let header = ResponseHeader::parse(&r);
        assert_eq!(header.group, 0x76);
        assert_eq!(header.opcode, 0x10);
        assert_eq!(header.payload, [1, 2, 3, 4]);
        assert_eq!(header.status, 0x01);
    }
}
