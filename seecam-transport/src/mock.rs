//! Scripted transport for testing command codecs without a camera.
//!
//! [`MockTransport`] records every request it is handed and answers from a
//! queue of scripted replies. When the queue is empty it falls back to an
//! optional responder closure, which makes it easy to build a camera that
//! echoes the request header back with a chosen status byte.
//!
//! ```ignore
//! use seecam_transport::mock::MockTransport;
//! use seecam_transport::Transport;
//!
//! let mock = MockTransport::echoing(0x01);
//! let mut request = seecam_transport::protocol::zeroed();
//! request[1] = 0x76;
//! request[2] = 0x03;
//! let reply = mock.transfer(&request).unwrap();
//! assert_eq!(&reply[..2], &[0x76, 0x03]);
//! assert_eq!(reply[6], 0x01);
//! assert_eq!(mock.transfer_count(), 1);
//! ```

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::protocol::{self, Report};
use crate::types::TransportDeviceInfo;
use crate::Transport;

type Responder = Box<dyn Fn(&Report) -> Result<Report, TransportError> + Send + Sync>;

/// A mock [`Transport`] with recorded requests and scripted replies.
pub struct MockTransport {
    open: Mutex<bool>,
    replies: Mutex<VecDeque<Result<Report, TransportError>>>,
    responder: Option<Responder>,
    sent: Mutex<Vec<Report>>,
    close_error: Mutex<Option<TransportError>>,
    info: TransportDeviceInfo,
}

impl MockTransport {
    /// Open transport with no scripted replies
    pub fn new() -> Self {
        Self {
            open: Mutex::new(true),
            replies: Mutex::new(VecDeque::new()),
            responder: None,
            sent: Mutex::new(Vec::new()),
            close_error: Mutex::new(None),
            info: TransportDeviceInfo {
                vid: protocol::device::VENDOR_ID,
                pid: protocol::device::PID_SEE3CAM_CU30,
                device_path: "mock".into(),
                serial: None,
                product_name: Some("Mock See3CAM".into()),
            },
        }
    }

    /// Transport that answers with `f(request)` whenever no reply is queued
    pub fn with_responder<F>(f: F) -> Self
    where
        F: Fn(&Report) -> Result<Report, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Some(Box::new(f)),
            ..Self::new()
        }
    }

    /// Camera that echoes group and operation code with the given status byte
    pub fn echoing(status: u8) -> Self {
        Self::echoing_with_payload(status, [0; 4])
    }

    /// Like [`echoing`](Self::echoing) with payload bytes at offsets 2..6
    pub fn echoing_with_payload(status: u8, payload: [u8; 4]) -> Self {
        Self::with_responder(move |req| {
            let mut resp = protocol::zeroed();
            resp[0] = req[1];
            resp[1] = req[2];
            resp[2..6].copy_from_slice(&payload);
            resp[6] = status;
            Ok(resp)
        })
    }

    /// Queue a raw reply
    pub fn push_reply(&self, reply: Report) {
        self.replies.lock().push_back(Ok(reply));
    }

    /// Queue a transport failure
    pub fn push_error(&self, err: TransportError) {
        self.replies.lock().push_back(Err(err));
    }

    /// Make the next `close` fail with `err`; the handle still ends up closed
    pub fn fail_next_close(&self, err: TransportError) {
        *self.close_error.lock() = Some(err);
    }

    /// Mark the handle open or closed
    pub fn set_open(&self, open: bool) {
        *self.open.lock() = open;
    }

    /// Every request handed to `transfer`, in order
    pub fn sent(&self) -> Vec<Report> {
        self.sent.lock().clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<Report> {
        self.sent.lock().last().copied()
    }

    /// Number of `transfer` invocations
    pub fn transfer_count(&self) -> usize {
        self.sent.lock().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn is_open(&self) -> bool {
        *self.open.lock()
    }

    fn transfer(&self, request: &Report) -> Result<Report, TransportError> {
        self.sent.lock().push(*request);
        if !self.is_open() {
            return Err(TransportError::Disconnected);
        }
        if let Some(reply) = self.replies.lock().pop_front() {
            return reply;
        }
        match &self.responder {
            Some(f) => f(request),
            None => Err(TransportError::Internal("no scripted reply".into())),
        }
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&self) -> Result<(), TransportError> {
        self.set_open(false);
        match self.close_error.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
