//! Instance paths for locating failures in nested inputs.
//!
//! Leaf validators report failures at the root. Each structural combinator
//! prepends the key or index it walked through on the way out, so a
//! [`JsonPath`] is assembled from the inside out and read from the outside in.

use std::fmt::{self, Display};

/// One step into a nested input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key, rendered as `.key` (or bare at the start of a path).
    Field(String),
    /// An array position, rendered as `[n]`.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Field(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Field(key)
    }
}

impl From<usize> for PathSegment {
    fn from(position: usize) -> Self {
        PathSegment::Index(position)
    }
}

/// The location of a value inside a nested input, outermost segment first.
///
/// # Example
///
/// ```rust
/// use verdict::JsonPath;
///
/// let path = JsonPath::from_field("email")
///     .prepend_index(0)
///     .prepend_field("users");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The path of the input itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A one-segment path naming `key`.
    pub fn from_field(key: impl Into<String>) -> Self {
        Self::root().push_field(key)
    }

    /// A one-segment path naming `position`.
    pub fn from_index(position: usize) -> Self {
        Self::root().push_index(position)
    }

    /// Extends the path one level deeper with an object key.
    pub fn push_field(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Field(key.into()));
        self
    }

    /// Extends the path one level deeper with an array position.
    pub fn push_index(mut self, position: usize) -> Self {
        self.segments.push(PathSegment::Index(position));
        self
    }

    /// Places `segment` in front of every existing segment.
    pub fn prepend(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.insert(0, segment.into());
        self
    }

    /// Places an object key in front of every existing segment.
    pub fn prepend_field(self, key: impl Into<String>) -> Self {
        self.prepend(PathSegment::Field(key.into()))
    }

    /// Places an array position in front of every existing segment.
    pub fn prepend_index(self, position: usize) -> Self {
        self.prepend(PathSegment::Index(position))
    }

    /// Returns `prefix` followed by this path.
    pub fn prepend_path(self, prefix: &JsonPath) -> Self {
        let mut segments = Vec::with_capacity(prefix.len() + self.len());
        segments.extend_from_slice(&prefix.segments);
        segments.extend(self.segments);
        Self { segments }
    }

    /// True for the path of the input itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Depth of the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [`is_root`](Self::is_root).
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Segments from outermost to innermost.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The enclosing location, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, outer) = self.segments.split_last()?;
        Some(Self {
            segments: outer.to_vec(),
        })
    }

    /// The innermost segment.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path for an error message about `object_name`.
    ///
    /// Field-rooted paths render exactly like [`Display`]. A path starting with
    /// an index has nothing to hang the brackets on, so it is rooted at the
    /// object name instead.
    ///
    /// ```rust
    /// use verdict::JsonPath;
    ///
    /// let fields = JsonPath::from_field("a").push_field("b");
    /// assert_eq!(fields.render("input"), "a.b");
    ///
    /// let indexed = JsonPath::from_index(2).push_field("name");
    /// assert_eq!(indexed.render("input"), "input[2].name");
    /// ```
    pub fn render(&self, object_name: &str) -> String {
        match self.segments.first() {
            Some(PathSegment::Index(_)) => format!("{}{}", object_name, self),
            _ => self.to_string(),
        }
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(key) if first => f.write_str(key)?,
                PathSegment::Field(key) => write!(f, ".{}", key)?,
                PathSegment::Index(position) => write!(f, "[{}]", position)?,
            }
            first = false;
        }
        Ok(())
    }
}
