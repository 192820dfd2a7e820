//! 2D affine transforms as reported by CSS
//!
//! A resolved `transform` reads back as `matrix(a, b, c, d, e, f)`, while an
//! inline declaration keeps the function list it was written with. Both
//! forms parse into the same [`TransformMatrix`].

/// Functions whose arguments are read; any other function is skipped
const KNOWN_FUNCTIONS: [&str; 7] = [
    "matrix",
    "translate",
    "translateX",
    "translateY",
    "scale",
    "scaleX",
    "scaleY",
];

/// CSS 2D matrix components
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformMatrix {
    pub scale_x: f64,
    pub skew_y: f64,
    pub skew_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformMatrix {
    pub const IDENTITY: TransformMatrix = TransformMatrix {
        scale_x: 1.0,
        skew_y: 0.0,
        skew_x: 0.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Pure translation
    pub const fn translation(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::IDENTITY
        }
    }

    /// Pure scale
    pub const fn scale(x: f64, y: f64) -> Self {
        Self {
            scale_x: x,
            scale_y: y,
            ..Self::IDENTITY
        }
    }

    /// Whether applying this transform changes nothing
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Parse a CSS transform value
    ///
    /// Accepts `none`, `matrix(...)` and lists of `translate`, `translateX`,
    /// `translateY`, `scale`, `scaleX`, `scaleY`. Unknown functions are
    /// skipped; anything malformed yields identity.
    pub fn parse(value: &str) -> TransformMatrix {
        let value = value.trim();
        if value.is_empty() || value == "none" {
            return Self::IDENTITY;
        }

        let mut matrix = Self::IDENTITY;
        let mut rest = value;
        while let Some(open) = rest.find('(') {
            let Some(close) = rest[open..].find(')').map(|c| open + c) else {
                return Self::IDENTITY;
            };
            let name = rest[..open].trim();
            if KNOWN_FUNCTIONS.iter().any(|known| *known == name) {
                let args: Option<Vec<f64>> = rest[open + 1..close]
                    .split(',')
                    .flat_map(str::split_whitespace)
                    .map(parse_length)
                    .collect();
                match args.and_then(|args| Self::from_function(name, &args)) {
                    Some(step) => matrix = matrix.then(&step),
                    None => return Self::IDENTITY,
                }
            }
            rest = &rest[close + 1..];
        }
        matrix
    }

    /// `None` when the argument count does not fit the function
    fn from_function(name: &str, args: &[f64]) -> Option<TransformMatrix> {
        let step = match (name, args) {
            ("matrix", [a, b, c, d, e, f]) => TransformMatrix {
                scale_x: *a,
                skew_y: *b,
                skew_x: *c,
                scale_y: *d,
                translate_x: *e,
                translate_y: *f,
            },
            ("translate", [x]) => Self::translation(*x, 0.0),
            ("translate", [x, y]) => Self::translation(*x, *y),
            ("translateX", [x]) => Self::translation(*x, 0.0),
            ("translateY", [y]) => Self::translation(0.0, *y),
            ("scale", [s]) => Self::scale(*s, *s),
            ("scale", [x, y]) => Self::scale(*x, *y),
            ("scaleX", [x]) => Self::scale(*x, 1.0),
            ("scaleY", [y]) => Self::scale(1.0, *y),
            _ => return None,
        };
        Some(step)
    }

    /// Compose so that `next` applies in the local space of `self`,
    /// matching left-to-right CSS function order
    pub fn then(&self, next: &TransformMatrix) -> TransformMatrix {
        TransformMatrix {
            scale_x: self.scale_x * next.scale_x + self.skew_x * next.skew_y,
            skew_y: self.skew_y * next.scale_x + self.scale_y * next.skew_y,
            skew_x: self.scale_x * next.skew_x + self.skew_x * next.scale_y,
            scale_y: self.skew_y * next.skew_x + self.scale_y * next.scale_y,
            translate_x: self.scale_x * next.translate_x
                + self.skew_x * next.translate_y
                + self.translate_x,
            translate_y: self.skew_y * next.translate_x
                + self.scale_y * next.translate_y
                + self.translate_y,
        }
    }
}

/// Parse a bare number or a `px` length
fn parse_length(token: &str) -> Option<f64> {
    let token = token.trim();
    token
        .strip_suffix("px")
        .unwrap_or(token)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
