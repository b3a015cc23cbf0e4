//! Message codec for the worker boundary.
//!
//! Both directions are flat lists of numbers:
//!
//! ```text
//! request:  [id, x0, y0, x1, y1, ..., x(n-1), y(n-1)]
//! response: [id, p1x, p1y, p2x, p2y]
//! ```
//!
//! Ids travel as `f64`, so only integers up to 2^53 survive the trip exactly.

use crate::dispatch::DispatchError;
use crate::domain::{ControlPoints, FitRequest, FitResponse, Point, RequestId};

/// One encoded message.
pub type Message = Vec<f64>;

/// Largest id an `f64` represents exactly.
const MAX_WIRE_ID: f64 = 9_007_199_254_740_992.0;

/// Encode a request without first collecting the points into a [`FitRequest`].
pub fn encode_request(id: RequestId, points: &[Point]) -> Message {
    let mut out = Vec::with_capacity(1 + 2 * points.len());
    out.push(id as f64);
    for p in points {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

impl FitRequest {
    pub fn encode(&self) -> Message {
        encode_request(self.id, &self.points)
    }

    pub fn decode(message: &[f64]) -> Result<Self, DispatchError> {
        let (&id, coords) = message.split_first().ok_or(DispatchError::EmptyMessage)?;
        let id = decode_id(id)?;
        if coords.len() % 2 != 0 {
            return Err(DispatchError::OddCoordinates(coords.len()));
        }
        let points = coords
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        Ok(FitRequest { id, points })
    }
}

impl FitResponse {
    pub fn encode(&self) -> Message {
        let [p1x, p1y, p2x, p2y] = self.control_points.to_array();
        vec![self.id as f64, p1x, p1y, p2x, p2y]
    }

    pub fn decode(message: &[f64]) -> Result<Self, DispatchError> {
        match *message {
            [id, p1x, p1y, p2x, p2y] => Ok(FitResponse {
                id: decode_id(id)?,
                control_points: ControlPoints::from_array([p1x, p1y, p2x, p2y]),
            }),
            [] => Err(DispatchError::EmptyMessage),
            _ => Err(DispatchError::ResponseLength(message.len())),
        }
    }
}

fn decode_id(value: f64) -> Result<RequestId, DispatchError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_WIRE_ID {
        Ok(value as RequestId)
    } else {
        Err(DispatchError::InvalidId(value))
    }
}
