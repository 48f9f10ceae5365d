use super::symbol::Range;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// An import declaration of a compilation unit.
///
/// `name` never carries the trailing `.*`; `is_on_demand` records it instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportDecl {
    pub name: String,
    pub is_static: bool,
    pub is_on_demand: bool,
    pub range: Range,
}

impl ImportDecl {
    /// `import a.b.C;`
    pub fn single(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_on_demand: false,
            range,
        }
    }

    /// `import a.b.*;`
    pub fn on_demand(package: impl Into<String>, range: Range) -> Self {
        Self {
            name: package.into(),
            is_static: false,
            is_on_demand: true,
            range,
        }
    }

    /// `import static a.b.C.member;`
    pub fn static_single(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            is_static: true,
            is_on_demand: false,
            range,
        }
    }

    /// `import static a.b.C.*;`
    pub fn static_on_demand(class: impl Into<String>, range: Range) -> Self {
        Self {
            name: class.into(),
            is_static: true,
            is_on_demand: true,
            range,
        }
    }

    /// Parses the text of an import declaration. The `import` keyword and
    /// the trailing semicolon are optional.
    pub fn parse(text: &str, range: Range) -> ApiResult<Self> {
        let mut rest = text.trim().trim_end_matches(';').trim();
        if let Some(after) = rest.strip_prefix("import") {
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                rest = after.trim_start();
            }
        }

        let is_static = match rest.strip_prefix("static ") {
            Some(after) => {
                rest = after.trim_start();
                true
            }
            None => false,
        };

        let (name, is_on_demand) = match rest.strip_suffix(".*") {
            Some(prefix) => (prefix, true),
            None => (rest, false),
        };

        let well_formed = !name.is_empty()
            && name.split('.').all(|segment| {
                let mut chars = segment.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                    && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            });
        // A single static import names a member, so it needs at least `C.m`
        if !well_formed || (is_static && !is_on_demand && !name.contains('.')) {
            return Err(ApiError::InvalidImport(text.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            is_static,
            is_on_demand,
            range,
        })
    }

    /// Last segment of the imported name: the class simple name of a
    /// single-type import, the member name of a single static import.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Canonical name of the class a static import reads members from.
    pub fn static_target(&self) -> Option<&str> {
        match (self.is_static, self.is_on_demand) {
            (true, true) => Some(&self.name),
            (true, false) => self.name.rsplit_once('.').map(|(class, _)| class),
            _ => None,
        }
    }
}
