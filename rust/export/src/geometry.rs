// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Geometry` array writer

use std::fmt;

use bim_json_geometry::GeometryRecord;

use crate::format::JsonWriter;

/// Inline form of the record closing every geometry array
pub const TERMINATOR: &str = "{ \"Type\": \"\" }";

fn write_record(writer: &mut JsonWriter, record: &GeometryRecord) -> fmt::Result {
    let Some(kind) = record.kind() else {
        return writer.raw(None, TERMINATOR);
    };

    writer.begin_object(None)?;
    writer.string(Some("Type"), record.type_tag())?;
    writer.string(Some("Kind"), kind.as_str())?;

    match record {
        GeometryRecord::Node { coords, .. } => {
            let text = crate::format::format_xyz(coords, writer.options());
            writer.raw(Some("Coords"), text)?;
        }
        GeometryRecord::Poly { points, .. } => {
            writer.begin_array(Some("Points"))?;
            for p in points {
                writer.point(p)?;
            }
            writer.end()?;
        }
        GeometryRecord::Mesh {
            points, triangles, ..
        } => {
            writer.begin_array(Some("Points"))?;
            for p in points {
                writer.point(p)?;
            }
            writer.end()?;

            writer.begin_array(Some("Planes"))?;
            for t in triangles {
                writer.triangle(t)?;
            }
            writer.end()?;
        }
        GeometryRecord::Terminator => {}
    }

    writer.end()
}

/// Write the `Geometry` array from already serialized records
pub fn write_geometry(writer: &mut JsonWriter, records: &[GeometryRecord]) -> fmt::Result {
    writer.begin_array(Some("Geometry"))?;
    for record in records {
        write_record(writer, record)?;
    }
    writer.end()
}
