//! Scene text format
//!
//! Line-based, whitespace separated, one keyword per line. A camera record:
//!
//! ```text
//! camera
//! ortho <left> <right> <top> <bottom> <near> <far>
//! projection <perspective|orthographic>
//! persp <fov> <aspect> <near> <far>
//! layermask <uint>
//! order <uint>
//! viewport <x> <y> <w> <h>
//! clearcolor <r> <g> <b>
//! camera_enabled <0|1>
//! ```
//!
//! followed by a blank line. Scene documents wrap records in game objects:
//! `gameobject <name>`, `layer <uint>`, `enabled <0|1>`, an optional `transform`
//! record (`position`, `rotation` as `x y z w`, `scale`) and an optional camera
//! record. Names use backslash escapes (`\\`, `\n`, `\r`, `\t`, `\s` for
//! a space at either end, `\u{hex}`). Floats are written with `.` as the
//! decimal point regardless of locale.
//!
//! Parsing is all-or-nothing: a document is fully parsed before anything is
//! created in the world.

use std::fmt;
use std::str::FromStr;

use crate::ecs::components::TransformComponent;
use crate::ecs::{GameObjectId, World};
use crate::foundation::math::{Quat, Quaternion, Vec3};
use crate::render::{Camera, ProjectionType};
use crate::scene::{LayerMask, Scene};

/// Error from parsing a scene or camera record, with the 1-based line it occurred on
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneParseError {
    /// Keyword not part of the format
    #[error("line {line}: unknown keyword '{keyword}'")]
    UnknownKeyword {
        /// Line number
        line: usize,
        /// Offending keyword
        keyword: String,
    },

    /// Keyword valid in the format but not where it appeared
    #[error("line {line}: '{keyword}' outside of a {context} record")]
    OutsideRecord {
        /// Line number
        line: usize,
        /// Offending keyword
        keyword: String,
        /// Record the keyword belongs to
        context: &'static str,
    },

    /// Record opened twice for the same game object
    #[error("line {line}: duplicate '{keyword}' record")]
    Duplicate {
        /// Line number
        line: usize,
        /// Record keyword
        keyword: String,
    },

    /// Wrong number of values after a keyword
    #[error("line {line}: '{keyword}' expects {expected} values, found {found}")]
    FieldCount {
        /// Line number
        line: usize,
        /// Keyword
        keyword: String,
        /// Values the keyword takes
        expected: usize,
        /// Values present
        found: usize,
    },

    /// Value that does not parse as the expected type
    #[error("line {line}: invalid value '{value}' for '{keyword}'")]
    InvalidValue {
        /// Line number
        line: usize,
        /// Keyword
        keyword: String,
        /// Offending value
        value: String,
    },

    /// Text that is not a camera record where one was expected
    #[error("line {line}: expected a camera record")]
    MissingCamera {
        /// Line number
        line: usize,
    },

    /// Content after a complete camera record
    #[error("line {line}: unexpected content after camera record")]
    TrailingContent {
        /// Line number
        line: usize,
    },
}

impl SceneParseError {
    /// 1-based line the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownKeyword { line, .. }
            | Self::OutsideRecord { line, .. }
            | Self::Duplicate { line, .. }
            | Self::FieldCount { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::MissingCamera { line }
            | Self::TrailingContent { line } => *line,
        }
    }
}

const CAMERA_KEYWORDS: [&str; 8] = [
    "ortho",
    "projection",
    "persp",
    "layermask",
    "order",
    "viewport",
    "clearcolor",
    "camera_enabled",
];
const TRANSFORM_KEYWORDS: [&str; 3] = ["position", "rotation", "scale"];

/// Serialize a camera record, including its terminating blank line
pub fn serialize_camera(camera: &Camera) -> String {
    CameraText(camera).to_string()
}

/// Parse a single camera record
///
/// Fields missing from the record keep their defaults. The viewport defaults
/// to an empty rectangle since there is no back buffer to size it from.
pub fn parse_camera(text: &str) -> Result<Camera, SceneParseError> {
    let mut lines = tokenize(text).peekable();
    let start = match lines.find(|line| !line.blank) {
        Some(line) if line.keyword == "camera" => line,
        Some(line) => return Err(SceneParseError::MissingCamera { line: line.number }),
        None => return Err(SceneParseError::MissingCamera { line: text.lines().count() + 1 }),
    };
    expect_values(&start, 0)?;

    let mut record = CameraRecord::default();
    while let Some(line) = lines.next_if(|line| !line.blank) {
        if !record.apply(&line)? {
            return Err(unexpected(&line, "camera"));
        }
    }
    if let Some(line) = lines.find(|line| !line.blank) {
        return Err(SceneParseError::TrailingContent { line: line.number });
    }
    Ok(record.build((0, 0)))
}

/// Serialize every live game object of `scene`
///
/// Transforms are written with their local values; parent links and mesh
/// renderers are not part of the format. Names are escaped so that line
/// breaks and surrounding whitespace survive a round trip.
pub fn serialize_scene(scene: &Scene, world: &World) -> String {
    SceneText { scene, world }.to_string()
}

/// Parse a scene document and create its game objects in `world`
///
/// Returns the created ids in document order. On error nothing is created.
pub fn deserialize_scene(text: &str, world: &mut World) -> Result<Vec<GameObjectId>, SceneParseError> {
    let records = parse_scene(text)?;
    log::info!("Deserialized {} game objects", records.len());

    let back_buffer = world.back_buffer_size();
    let ids = records
        .into_iter()
        .map(|record| {
            let id = world.create_game_object(record.name);
            if let Some(bits) = record.layer {
                world.set_layer(id, LayerMask::from_raw(bits));
            }
            if let Some(enabled) = record.enabled {
                world.set_enabled(id, enabled);
            }
            if let Some(transform) = record.transform {
                world.add_component(id, transform.build());
            }
            if let Some(camera) = record.camera {
                world.add_component(id, camera.build(back_buffer));
            }
            id
        })
        .collect();
    Ok(ids)
}

struct CameraText<'a>(&'a Camera);

impl fmt::Display for CameraText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let camera = self.0;
        let ortho = camera.ortho_params();
        let projection = match camera.projection_type() {
            ProjectionType::Perspective => "perspective",
            ProjectionType::Orthographic => "orthographic",
        };
        let viewport = camera.viewport();
        let color = camera.clear_color();

        writeln!(f, "camera")?;
        writeln!(
            f,
            "ortho {} {} {} {} {} {}",
            ortho.left, ortho.right, ortho.top, ortho.bottom, camera.near(), camera.far()
        )?;
        writeln!(f, "projection {projection}")?;
        writeln!(f, "persp {} {} {} {}", camera.fov_degrees(), camera.aspect(), camera.near(), camera.far())?;
        writeln!(f, "layermask {}", camera.layer_mask().bits())?;
        writeln!(f, "order {}", camera.render_order())?;
        writeln!(f, "viewport {} {} {} {}", viewport.x, viewport.y, viewport.width, viewport.height)?;
        writeln!(f, "clearcolor {} {} {}", color.x, color.y, color.z)?;
        writeln!(f, "camera_enabled {}", u8::from(camera.is_enabled()))?;
        writeln!(f)
    }
}

struct SceneText<'a> {
    scene: &'a Scene,
    world: &'a World,
}

impl fmt::Display for SceneText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &id in self.scene.objects() {
            let Some(object) = self.world.game_object(id) else {
                continue;
            };
            writeln!(f, "gameobject {}", escape_name(object.name()))?;
            writeln!(f, "layer {}", object.layer().bits())?;
            writeln!(f, "enabled {}", u8::from(object.is_enabled()))?;

            if let Some(transform) = self.world.component::<TransformComponent>(id) {
                let (p, r, s) = (transform.position, transform.rotation, transform.scale);
                writeln!(f, "transform")?;
                writeln!(f, "position {} {} {}", p.x, p.y, p.z)?;
                writeln!(f, "rotation {} {} {} {}", r.i, r.j, r.k, r.w)?;
                writeln!(f, "scale {} {} {}", s.x, s.y, s.z)?;
            }
            match self.world.component::<Camera>(id) {
                Some(camera) => write!(f, "{}", CameraText(camera))?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

/// Escape a game object name onto a single line
///
/// Backslashes, control characters and whitespace at either end become
/// backslash escapes; interior spaces are kept as they are.
fn escape_name(name: &str) -> String {
    let start = name.len() - name.trim_start().len();
    let end = name.trim_end().len();
    let mut out = String::with_capacity(name.len());
    for (index, c) in name.char_indices() {
        let edge = index < start || index >= end;
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if edge => out.push_str("\\s"),
            c if c.is_control() || (edge && c.is_whitespace()) => {
                out.push_str(&format!("\\u{{{:x}}}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_name`] for the text after `gameobject`
fn unescape_name(line: &Line<'_>) -> Result<String, SceneParseError> {
    let mut name = String::with_capacity(line.rest.len());
    let mut chars = line.rest.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            name.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some('\\') => Some('\\'),
            Some('n') => Some('\n'),
            Some('r') => Some('\r'),
            Some('t') => Some('\t'),
            Some('s') => Some(' '),
            Some('u') => unicode_escape(&mut chars),
            _ => None,
        };
        match decoded {
            Some(decoded) => name.push(decoded),
            None => return Err(invalid_value(line, line.rest)),
        }
    }
    Ok(name)
}

/// Decode the `{hex}` part of a `\u{hex}` escape
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    if chars.next()? != '{' {
        return None;
    }
    let mut code = String::new();
    for c in chars {
        if c == '}' {
            return u32::from_str_radix(&code, 16).ok().and_then(char::from_u32);
        }
        code.push(c);
    }
    None
}

/// One line split into keyword and values
struct Line<'a> {
    number: usize,
    blank: bool,
    keyword: &'a str,
    values: Vec<&'a str>,
    rest: &'a str,
}

fn tokenize(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().enumerate().map(|(index, raw)| {
        let trimmed = raw.trim();
        let (keyword, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
        Line {
            number: index + 1,
            blank: trimmed.is_empty(),
            keyword,
            values: rest.split_whitespace().collect(),
            rest: rest.trim(),
        }
    })
}

fn unexpected(line: &Line<'_>, context: &'static str) -> SceneParseError {
    let known = CAMERA_KEYWORDS.contains(&line.keyword)
        || TRANSFORM_KEYWORDS.contains(&line.keyword)
        || ["camera", "transform", "gameobject", "layer", "enabled"].contains(&line.keyword);
    if known {
        SceneParseError::OutsideRecord {
            line: line.number,
            keyword: line.keyword.to_string(),
            context,
        }
    } else {
        SceneParseError::UnknownKeyword {
            line: line.number,
            keyword: line.keyword.to_string(),
        }
    }
}

fn expect_values(line: &Line<'_>, expected: usize) -> Result<(), SceneParseError> {
    if line.values.len() == expected {
        Ok(())
    } else {
        Err(SceneParseError::FieldCount {
            line: line.number,
            keyword: line.keyword.to_string(),
            expected,
            found: line.values.len(),
        })
    }
}

fn invalid_value(line: &Line<'_>, value: &str) -> SceneParseError {
    SceneParseError::InvalidValue {
        line: line.number,
        keyword: line.keyword.to_string(),
        value: value.to_string(),
    }
}

fn parse_values<T: FromStr, const N: usize>(line: &Line<'_>) -> Result<[T; N], SceneParseError> {
    expect_values(line, N)?;
    let values = line
        .values
        .iter()
        .map(|value| value.parse::<T>().map_err(|_| invalid_value(line, value)))
        .collect::<Result<Vec<T>, _>>()?;
    values.try_into().map_err(|_| SceneParseError::FieldCount {
        line: line.number,
        keyword: line.keyword.to_string(),
        expected: N,
        found: line.values.len(),
    })
}

fn parse_flag(line: &Line<'_>) -> Result<bool, SceneParseError> {
    let [value] = parse_values::<String, 1>(line)?;
    match value.as_str() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(invalid_value(line, &value)),
    }
}

#[derive(Debug, Default)]
struct CameraRecord {
    ortho: Option<[f32; 6]>,
    projection: Option<ProjectionType>,
    persp: Option<[f32; 4]>,
    layer_mask: Option<u32>,
    order: Option<u32>,
    viewport: Option<[i32; 4]>,
    clear_color: Option<[f32; 3]>,
    enabled: Option<bool>,
}

impl CameraRecord {
    /// Apply a camera field; `Ok(false)` if the keyword is not a camera field
    fn apply(&mut self, line: &Line<'_>) -> Result<bool, SceneParseError> {
        match line.keyword {
            "ortho" => self.ortho = Some(parse_values(line)?),
            "projection" => {
                let [value] = parse_values::<String, 1>(line)?;
                self.projection = Some(match value.as_str() {
                    "perspective" => ProjectionType::Perspective,
                    "orthographic" => ProjectionType::Orthographic,
                    _ => return Err(invalid_value(line, &value)),
                });
            }
            "persp" => self.persp = Some(parse_values(line)?),
            "layermask" => self.layer_mask = Some(parse_values::<u32, 1>(line)?[0]),
            "order" => self.order = Some(parse_values::<u32, 1>(line)?[0]),
            "viewport" => self.viewport = Some(parse_values(line)?),
            "clearcolor" => self.clear_color = Some(parse_values(line)?),
            "camera_enabled" => self.enabled = Some(parse_flag(line)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn build(&self, back_buffer: (u32, u32)) -> Camera {
        let mut camera = Camera::new(back_buffer.0, back_buffer.1);
        if let Some([fov, aspect, near, far]) = self.persp {
            camera.set_perspective(fov, aspect, near, far);
        }
        if let Some([left, right, top, bottom, near, far]) = self.ortho {
            camera.set_orthographic(left, right, bottom, top, near, far);
        }
        camera.set_projection_type(self.projection.unwrap_or_default());
        if let Some(bits) = self.layer_mask {
            camera.set_layer_mask(LayerMask::from_raw(bits));
        }
        if let Some(order) = self.order {
            camera.set_render_order(order);
        }
        if let Some([x, y, width, height]) = self.viewport {
            camera.set_viewport(x, y, width, height);
        }
        if let Some([r, g, b]) = self.clear_color {
            camera.set_clear_color(Vec3::new(r, g, b));
        }
        if let Some(enabled) = self.enabled {
            camera.set_enabled(enabled);
        }
        camera
    }
}

#[derive(Debug, Default)]
struct TransformRecord {
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
}

impl TransformRecord {
    fn apply(&mut self, line: &Line<'_>) -> Result<bool, SceneParseError> {
        match line.keyword {
            "position" => self.position = Some(parse_values(line)?),
            "rotation" => self.rotation = Some(parse_values(line)?),
            "scale" => self.scale = Some(parse_values(line)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn build(&self) -> TransformComponent {
        let mut transform = TransformComponent::identity();
        if let Some([x, y, z]) = self.position {
            transform.position = Vec3::new(x, y, z);
        }
        if let Some([x, y, z, w]) = self.rotation {
            transform.rotation = Quat::from_quaternion(Quaternion::new(w, x, y, z));
        }
        if let Some([x, y, z]) = self.scale {
            transform.scale = Vec3::new(x, y, z);
        }
        transform
    }
}

#[derive(Debug)]
struct ObjectRecord {
    name: String,
    layer: Option<u32>,
    enabled: Option<bool>,
    transform: Option<TransformRecord>,
    camera: Option<CameraRecord>,
}

#[derive(Clone, Copy)]
enum Section {
    Object,
    Transform,
    Camera,
}

fn parse_scene(text: &str) -> Result<Vec<ObjectRecord>, SceneParseError> {
    let mut records: Vec<ObjectRecord> = Vec::new();
    let mut section = Section::Object;

    for line in tokenize(text) {
        if line.blank {
            section = Section::Object;
            continue;
        }
        if line.keyword == "gameobject" {
            records.push(ObjectRecord {
                name: unescape_name(&line)?,
                layer: None,
                enabled: None,
                transform: None,
                camera: None,
            });
            section = Section::Object;
            continue;
        }
        let Some(record) = records.last_mut() else {
            return Err(unexpected(&line, "gameobject"));
        };

        let handled = match section {
            Section::Camera => match record.camera.as_mut() {
                Some(camera) => camera.apply(&line)?,
                None => false,
            },
            Section::Transform => match record.transform.as_mut() {
                Some(transform) => transform.apply(&line)?,
                None => false,
            },
            Section::Object => false,
        };
        if handled {
            continue;
        }

        match line.keyword {
            "layer" => record.layer = Some(parse_values::<u32, 1>(&line)?[0]),
            "enabled" => record.enabled = Some(parse_flag(&line)?),
            "transform" => {
                expect_values(&line, 0)?;
                if record.transform.is_some() {
                    return Err(duplicate(&line));
                }
                record.transform = Some(TransformRecord::default());
                section = Section::Transform;
            }
            "camera" => {
                expect_values(&line, 0)?;
                if record.camera.is_some() {
                    return Err(duplicate(&line));
                }
                record.camera = Some(CameraRecord::default());
                section = Section::Camera;
            }
            keyword if CAMERA_KEYWORDS.contains(&keyword) => return Err(unexpected(&line, "camera")),
            keyword if TRANSFORM_KEYWORDS.contains(&keyword) => return Err(unexpected(&line, "transform")),
            _ => return Err(unexpected(&line, "gameobject")),
        }
    }
    Ok(records)
}

fn duplicate(line: &Line<'_>) -> SceneParseError {
    SceneParseError::Duplicate {
        line: line.number,
        keyword: line.keyword.to_string(),
    }
}
