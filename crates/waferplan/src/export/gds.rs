//! GDSII stream output.
//!
//! The stream holds a single library (`WAFER_LIB`) with a single structure
//! (`WAFER_DIE_LAYOUT`). The structure contains one boundary for the wafer
//! edge, one for the usable edge and one per recorded die. Circles are
//! approximated by 64-vertex polygons.
//!
//! One user unit is a micrometer and one database unit a nanometer, so a
//! millimeter is 10⁶ database units. Y coordinates are negated on output so
//! that the flat, which sits at +Y in wafer coordinates, appears at the
//! bottom of a layout viewer.

use std::{f64::consts::TAU, io::Write};

use log::{debug, info};

use waferplan_core::{
    geometry::Point,
    layer::{LayerConfig, LayerSpec},
};

use super::{Error, Exporter};
use crate::placement::LayoutResult;

/// Database units per millimeter.
pub const DATABASE_UNITS_PER_MM: f64 = 1e6;

/// User unit in meters (1 µm).
pub const USER_UNIT: f64 = 1e-6;

/// Database unit in meters (1 nm).
pub const DATABASE_UNIT: f64 = 1e-9;

/// Stream format version written to the HEADER record.
pub const STREAM_VERSION: i16 = 5;

pub const LIBRARY_NAME: &str = "WAFER_LIB";
pub const STRUCTURE_NAME: &str = "WAFER_DIE_LAYOUT";

/// Vertices used to approximate a circle, before closing.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Modification and access time stamped on the library and structure.
const TIMESTAMP: [i16; 6] = [2024, 1, 1, 0, 0, 0];

const MANTISSA_SCALE: f64 = (1u64 << 56) as f64;

/// Record types written by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    Header = 0x00,
    BgnLib = 0x01,
    LibName = 0x02,
    Units = 0x03,
    EndLib = 0x04,
    BgnStr = 0x05,
    StrName = 0x06,
    EndStr = 0x07,
    Boundary = 0x08,
    Layer = 0x0D,
    DataType = 0x0E,
    Xy = 0x10,
    EndEl = 0x11,
}

/// Payload encodings of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    NoData = 0x00,
    Int16 = 0x02,
    Int32 = 0x03,
    Real64 = 0x05,
    Ascii = 0x06,
}

/// Encodes `value` as an excess-64 base-16 real.
///
/// The mantissa is rounded to 56 bits. Zero encodes as eight zero bytes.
/// Magnitudes of 16⁶³ and above saturate to the largest representable value.
///
/// # Examples
///
/// ```
/// # use waferplan::export::gds::encode_real64;
/// assert_eq!(encode_real64(1.0), [0x41, 0x10, 0, 0, 0, 0, 0, 0]);
/// assert_eq!(encode_real64(0.0), [0; 8]);
/// ```
pub fn encode_real64(value: f64) -> [u8; 8] {
    if value == 0.0 {
        return [0; 8];
    }

    let sign = if value < 0.0 { 0x80 } else { 0x00 };
    let mut mantissa = value.abs();
    let mut exponent: i32 = 0;
    while mantissa >= 1.0 && exponent < 63 {
        mantissa /= 16.0;
        exponent += 1;
    }
    while mantissa < 1.0 / 16.0 && exponent > -64 {
        mantissa *= 16.0;
        exponent -= 1;
    }

    let mut bits = (mantissa * MANTISSA_SCALE).round() as u64;
    if bits >= 1 << 56 {
        bits >>= 4;
        exponent += 1;
    }
    if exponent > 63 {
        exponent = 63;
        bits = (1 << 56) - 1;
    }

    let mut bytes = [0; 8];
    bytes[0] = sign | ((exponent + 64) as u8 & 0x7F);
    bytes[1..].copy_from_slice(&bits.to_be_bytes()[1..]);
    bytes
}

/// Decodes an excess-64 base-16 real.
pub fn decode_real64(bytes: [u8; 8]) -> f64 {
    if bytes == [0; 8] {
        return 0.0;
    }

    let sign = if bytes[0] & 0x80 != 0 { -1.0 } else { 1.0 };
    let exponent = i32::from(bytes[0] & 0x7F) - 64;
    let mut mantissa_bytes = [0; 8];
    mantissa_bytes[1..].copy_from_slice(&bytes[1..]);
    let mantissa = u64::from_be_bytes(mantissa_bytes) as f64 / MANTISSA_SCALE;

    sign * mantissa * 16f64.powi(exponent)
}

/// Converts millimeters to database units.
///
/// # Errors
///
/// Returns [`Error::Overflow`] if the rounded value does not fit an `i32`.
pub fn to_database_units(mm: f64) -> Result<i32, Error> {
    let units = (mm * DATABASE_UNITS_PER_MM).round();
    if !units.is_finite() || units < f64::from(i32::MIN) || units > f64::from(i32::MAX) {
        return Err(Error::Overflow(mm));
    }
    Ok(units as i32)
}

/// Returns a closed regular polygon approximating a circle at the origin.
fn circle_outline(radius: f64) -> Vec<Point> {
    let mut points: Vec<_> = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    points.push(points[0]);
    points
}

/// A GDSII stream under construction.
///
/// The encoder appends records to an owned buffer. Use [`encode`] for the
/// complete wafer layout, or the record writers to build a stream by hand.
#[derive(Debug, Default)]
pub struct GdsEncoder {
    buffer: Vec<u8>,
    records: usize,
    boundaries: usize,
}

impl GdsEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record with a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the record would exceed the 16-bit
    /// length field or the payload has an odd length.
    pub fn write_record(
        &mut self,
        record_type: RecordType,
        data_type: DataType,
        payload: &[u8],
    ) -> Result<(), Error> {
        if payload.len() % 2 != 0 {
            return Err(Error::Render(format!(
                "{record_type:?} payload has odd length {}",
                payload.len()
            )));
        }
        let length = u16::try_from(payload.len() + 4).map_err(|_| {
            Error::Render(format!(
                "{record_type:?} payload of {} bytes exceeds the record size limit",
                payload.len()
            ))
        })?;

        self.buffer.extend_from_slice(&length.to_be_bytes());
        self.buffer.push(record_type as u8);
        self.buffer.push(data_type as u8);
        self.buffer.extend_from_slice(payload);
        self.records += 1;
        Ok(())
    }

    /// Appends an ASCII string record, NUL-padded to even length.
    pub fn write_string(&mut self, record_type: RecordType, value: &str) -> Result<(), Error> {
        if !value.is_ascii() {
            return Err(Error::Render(format!("`{value}` is not an ASCII string")));
        }
        let mut payload = value.as_bytes().to_vec();
        if payload.len() % 2 != 0 {
            payload.push(0);
        }
        self.write_record(record_type, DataType::Ascii, &payload)
    }

    pub fn write_int16(&mut self, record_type: RecordType, values: &[i16]) -> Result<(), Error> {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.write_record(record_type, DataType::Int16, &payload)
    }

    pub fn write_int32(&mut self, record_type: RecordType, values: &[i32]) -> Result<(), Error> {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.write_record(record_type, DataType::Int32, &payload)
    }

    pub fn write_real64(&mut self, record_type: RecordType, values: &[f64]) -> Result<(), Error> {
        let payload: Vec<u8> = values.iter().flat_map(|&v| encode_real64(v)).collect();
        self.write_record(record_type, DataType::Real64, &payload)
    }

    /// Appends an empty record such as ENDEL or ENDLIB.
    pub fn write_marker(&mut self, record_type: RecordType) -> Result<(), Error> {
        self.write_record(record_type, DataType::NoData, &[])
    }

    /// Appends the library header, units and structure header.
    pub fn begin_structure(&mut self) -> Result<(), Error> {
        let timestamps = [TIMESTAMP, TIMESTAMP].concat();

        self.write_int16(RecordType::Header, &[STREAM_VERSION])?;
        self.write_int16(RecordType::BgnLib, &timestamps)?;
        self.write_string(RecordType::LibName, LIBRARY_NAME)?;
        self.write_real64(RecordType::Units, &[USER_UNIT, DATABASE_UNIT])?;
        self.write_int16(RecordType::BgnStr, &timestamps)?;
        self.write_string(RecordType::StrName, STRUCTURE_NAME)
    }

    /// Closes the structure and the library.
    pub fn end_structure(&mut self) -> Result<(), Error> {
        self.write_marker(RecordType::EndStr)?;
        self.write_marker(RecordType::EndLib)
    }

    /// Appends a boundary element.
    ///
    /// `points` are wafer coordinates in millimeters and must already be
    /// closed. Y is negated on output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] for a coordinate outside the database
    /// unit range.
    pub fn add_boundary(&mut self, layer: LayerSpec, points: &[Point]) -> Result<(), Error> {
        let mut coordinates = Vec::with_capacity(points.len() * 2);
        for point in points {
            let point = point.flip_y();
            coordinates.push(to_database_units(point.x())?);
            coordinates.push(to_database_units(point.y())?);
        }

        self.write_marker(RecordType::Boundary)?;
        self.write_int16(RecordType::Layer, &[layer.layer()])?;
        self.write_int16(RecordType::DataType, &[layer.datatype()])?;
        self.write_int32(RecordType::Xy, &coordinates)?;
        self.write_marker(RecordType::EndEl)?;
        self.boundaries += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of boundary elements written so far.
    pub fn boundary_count(&self) -> usize {
        self.boundaries
    }

    /// Returns the encoded stream.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Encodes the wafer outline, the usable outline and every recorded die.
///
/// Full and partial dies share the die layer. A usable radius of zero or
/// less collapses the usable outline onto the wafer center.
///
/// # Errors
///
/// Returns [`Error::Overflow`] if a coordinate does not fit a database unit.
pub fn encode(result: &LayoutResult, layers: &LayerConfig) -> Result<Vec<u8>, Error> {
    let mut encoder = GdsEncoder::new();
    encoder.begin_structure()?;

    encoder.add_boundary(layers.wafer(), &circle_outline(result.wafer_radius()))?;
    encoder.add_boundary(
        layers.usable(),
        &circle_outline(result.usable_radius().max(0.0)),
    )?;
    for position in result.positions() {
        encoder.add_boundary(layers.die(), &position.bounds().closed_outline())?;
    }

    encoder.end_structure()?;

    debug!(
        records = encoder.record_count(),
        boundaries = encoder.boundary_count();
        "GDSII stream encoded"
    );
    Ok(encoder.into_bytes())
}

/// GDSII exporter writing to any [`Write`] destination.
///
/// # Examples
///
/// ```
/// # use waferplan::{export::{Exporter, gds::Gds}, layer::LayerConfig, placement::{self, PlacementConfig}, wafer::{DieSpec, WaferSpec}};
/// let wafer = WaferSpec::new(100.0, 3.0);
/// let die = DieSpec::new(10.0, 10.0).with_scribe(0.1);
/// let result = placement::place(&wafer, &die, &PlacementConfig::default()).unwrap();
///
/// let mut gds = Gds::new(Vec::<u8>::new(), LayerConfig::default());
/// gds.export_layout(&result).unwrap();
/// assert!(!gds.into_inner().is_empty());
/// ```
#[derive(Debug)]
pub struct Gds<W: Write> {
    writer: W,
    layers: LayerConfig,
}

impl<W: Write> Gds<W> {
    pub fn new(writer: W, layers: LayerConfig) -> Self {
        Self { writer, layers }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for Gds<W> {
    fn export_layout(&mut self, result: &LayoutResult) -> Result<(), Error> {
        let bytes = encode(result, &self.layers)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        info!(bytes = bytes.len(), dies = result.positions().len(); "GDSII exported");
        Ok(())
    }
}
