//! The two-section mesh text format.
//!
//! A mesh file is UTF-8 text holding exactly two sections separated by one or
//! more blank lines. Section one is rows of comma-separated floats, one vertex
//! record per row, flattened in row-major order. Section two is rows of
//! comma-separated non-negative integers, the triangle indices. There is no
//! header and no stride field ... the vertex stride is a convention between
//! the file author and the consumer's vertex layout.

/// Vertex stride convention used by the built-in meshes and the renderer:
/// position xyz followed by uv.
pub const POSITION_UV_FLOATS: usize = 5;

/// Flattened mesh payload: vertex floats in row-major order plus triangle
/// indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertex records at the given stride, or `None` when the float
    /// count does not divide evenly.
    pub fn vertex_count(&self, floats_per_vertex: usize) -> Option<usize> {
        if floats_per_vertex == 0 || self.vertices.len() % floats_per_vertex != 0 {
            return None;
        }
        Some(self.vertices.len() / floats_per_vertex)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn max_index(&self) -> Option<u32> {
        self.indices.iter().copied().max()
    }

    /// Built-in unit cube in the position+uv convention, centered at the
    /// origin with half extent 0.5. Serves as the fallback scene when no mesh
    /// files load.
    pub fn unit_cube() -> Self {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let vertices = vec![
            // +Z face
            -p, -p,  p,  0.0, 0.0,
             p, -p,  p,  1.0, 0.0,
             p,  p,  p,  1.0, 1.0,
            -p,  p,  p,  0.0, 1.0,
            // -Z face
             p, -p, -p,  0.0, 0.0,
            -p, -p, -p,  1.0, 0.0,
            -p,  p, -p,  1.0, 1.0,
             p,  p, -p,  0.0, 1.0,
            // +X face
             p, -p,  p,  0.0, 0.0,
             p, -p, -p,  1.0, 0.0,
             p,  p, -p,  1.0, 1.0,
             p,  p,  p,  0.0, 1.0,
            // -X face
            -p, -p, -p,  0.0, 0.0,
            -p, -p,  p,  1.0, 0.0,
            -p,  p,  p,  1.0, 1.0,
            -p,  p, -p,  0.0, 1.0,
            // +Y face
            -p,  p,  p,  0.0, 0.0,
             p,  p,  p,  1.0, 0.0,
             p,  p, -p,  1.0, 1.0,
            -p,  p, -p,  0.0, 1.0,
            // -Y face
            -p, -p, -p,  0.0, 0.0,
             p, -p, -p,  1.0, 0.0,
             p, -p,  p,  1.0, 1.0,
            -p, -p,  p,  0.0, 1.0,
        ];
        #[rustfmt::skip]
        let indices = vec![
            0,1,2, 2,3,0,       // +Z
            4,5,6, 6,7,4,       // -Z
            8,9,10, 10,11,8,    // +X
            12,13,14, 14,15,12, // -X
            16,17,18, 18,19,16, // +Y
            20,21,22, 22,23,20, // -Y
        ];
        Self { vertices, indices }
    }
}

/// Errors from parsing the mesh text format. Line and column are 1-based;
/// the column points at the first byte of the offending token.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshFormatError {
    #[error("mesh text is empty")]
    Empty,
    #[error("expected two sections separated by a blank line, found {found}")]
    MissingSection { found: usize },
    #[error("unexpected extra section starting at line {line}")]
    ExtraSection { line: usize },
    #[error("line {line}, column {column}: invalid float {token:?}")]
    InvalidFloat {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("line {line}, column {column}: invalid index {token:?}")]
    InvalidIndex {
        line: usize,
        column: usize,
        token: String,
    },
}

/// Parses mesh text into vertex floats and triangle indices.
///
/// All-or-nothing: the first malformed token or section-count violation
/// returns an error and no partial data. Blank-line runs collapse into a
/// single separator; whitespace around tokens is tolerated.
pub fn parse(text: &str) -> Result<MeshData, MeshFormatError> {
    let mut sections: Vec<Vec<(usize, &str)>> = Vec::new();
    let mut current: Vec<(usize, &str)> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push((idx + 1, line));
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }

    match sections.len() {
        0 => Err(MeshFormatError::Empty),
        1 => Err(MeshFormatError::MissingSection { found: 1 }),
        2 => Ok(MeshData {
            vertices: parse_floats(&sections[0])?,
            indices: parse_indices(&sections[1])?,
        }),
        _ => Err(MeshFormatError::ExtraSection {
            line: sections[2][0].0,
        }),
    }
}

fn parse_floats(rows: &[(usize, &str)]) -> Result<Vec<f32>, MeshFormatError> {
    let mut values = Vec::new();
    for &(line, text) in rows {
        let mut column = 1usize;
        for token in text.split(',') {
            let trimmed = token.trim();
            let start = column + (token.len() - token.trim_start().len());
            match trimmed.parse::<f32>() {
                Ok(v) => values.push(v),
                Err(_) => {
                    return Err(MeshFormatError::InvalidFloat {
                        line,
                        column: start,
                        token: trimmed.to_string(),
                    });
                }
            }
            column += token.len() + 1;
        }
    }
    Ok(values)
}

fn parse_indices(rows: &[(usize, &str)]) -> Result<Vec<u32>, MeshFormatError> {
    let mut values = Vec::new();
    for &(line, text) in rows {
        let mut column = 1usize;
        for token in text.split(',') {
            let trimmed = token.trim();
            let start = column + (token.len() - token.trim_start().len());
            match trimmed.parse::<u32>() {
                Ok(v) => values.push(v),
                Err(_) => {
                    return Err(MeshFormatError::InvalidIndex {
                        line,
                        column: start,
                        token: trimmed.to_string(),
                    });
                }
            }
            column += token.len() + 1;
        }
    }
    Ok(values)
}

/// Renders mesh data back to the text format: vertex rows of `floats_per_row`
/// values, a blank line, then index rows of three. A mesh with an empty
/// section cannot round-trip ... the format requires both sections.
pub fn serialize(data: &MeshData, floats_per_row: usize) -> String {
    let stride = floats_per_row.max(1);
    let mut out = String::new();
    for row in data.vertices.chunks(stride) {
        let rendered: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&rendered.join(","));
        out.push('\n');
    }
    out.push('\n');
    for tri in data.indices.chunks(3) {
        let rendered: Vec<String> = tri.iter().map(|i| i.to_string()).collect();
        out.push_str(&rendered.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_section_example() {
        let data = parse("1,2,3\n4,5,6\n\n0,1,2\n").unwrap();
        assert_eq!(data.vertices, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(data.indices, vec![0, 1, 2]);
    }

    #[test]
    fn tolerates_token_whitespace_and_crlf() {
        let data = parse("1, 2 ,3\r\n\r\n0, 1 ,2\r\n").unwrap();
        assert_eq!(data.vertices, vec![1.0, 2.0, 3.0]);
        assert_eq!(data.indices, vec![0, 1, 2]);
    }

    #[test]
    fn collapses_blank_line_runs() {
        let data = parse("1,2\n\n\n\n0\n").unwrap();
        assert_eq!(data.vertices, vec![1.0, 2.0]);
        assert_eq!(data.indices, vec![0]);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse(""), Err(MeshFormatError::Empty));
        assert_eq!(parse("\n  \n\n"), Err(MeshFormatError::Empty));
    }

    #[test]
    fn rejects_single_section() {
        assert_eq!(
            parse("1,2,3\n"),
            Err(MeshFormatError::MissingSection { found: 1 })
        );
    }

    #[test]
    fn rejects_extra_section() {
        assert_eq!(
            parse("1\n\n2\n\n3\n"),
            Err(MeshFormatError::ExtraSection { line: 5 })
        );
    }

    #[test]
    fn tolerates_trailing_blank_lines() {
        assert!(parse("1,2\n\n0\n\n\n").is_ok());
    }

    #[test]
    fn reports_float_error_position() {
        assert_eq!(
            parse("1,x,3\n\n0\n"),
            Err(MeshFormatError::InvalidFloat {
                line: 1,
                column: 3,
                token: "x".into(),
            })
        );
        // Leading spaces shift the column to the token's first byte.
        assert_eq!(
            parse("1,  bad,3\n\n0\n"),
            Err(MeshFormatError::InvalidFloat {
                line: 1,
                column: 5,
                token: "bad".into(),
            })
        );
    }

    #[test]
    fn reports_index_error_position() {
        assert_eq!(
            parse("1,2\n\n0,-1\n"),
            Err(MeshFormatError::InvalidIndex {
                line: 3,
                column: 3,
                token: "-1".into(),
            })
        );
    }

    #[test]
    fn rejects_empty_tokens() {
        assert_eq!(
            parse("1,,2\n\n0\n"),
            Err(MeshFormatError::InvalidFloat {
                line: 1,
                column: 3,
                token: String::new(),
            })
        );
    }

    #[test]
    fn serializes_expected_layout() {
        let data = MeshData {
            vertices: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            indices: vec![0, 1, 2],
        };
        assert_eq!(serialize(&data, 3), "1,2,3\n4,5,6\n\n0,1,2\n");
    }

    #[test]
    fn roundtrips_fractional_and_negative_values() {
        let data = MeshData {
            vertices: vec![0.5, -1.25, 3.0, 0.1, 2.0, -0.333],
            indices: vec![0, 1, 2, 2, 1, 0],
        };
        let reparsed = parse(&serialize(&data, 3)).unwrap();
        assert_eq!(reparsed, data);
    }

    #[test]
    fn roundtrips_unit_cube() {
        let cube = MeshData::unit_cube();
        let reparsed = parse(&serialize(&cube, POSITION_UV_FLOATS)).unwrap();
        assert_eq!(reparsed, cube);
    }

    #[test]
    fn unit_cube_shape() {
        let cube = MeshData::unit_cube();
        assert_eq!(cube.vertex_count(POSITION_UV_FLOATS), Some(24));
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.max_index(), Some(23));
    }

    #[test]
    fn vertex_count_rejects_uneven_strides() {
        let data = MeshData {
            vertices: vec![1.0, 2.0, 3.0, 4.0],
            indices: vec![0],
        };
        assert_eq!(data.vertex_count(2), Some(2));
        assert_eq!(data.vertex_count(3), None);
        assert_eq!(data.vertex_count(0), None);
    }
}
