//! # Templates Module
//!
//! This module provides functionality for managing license templates, rendering
//! them with the copyright holder and year, and wrapping the result as a
//! comment block.
//!
//! The module includes:
//! - [`TemplateManager`] for loading and rendering license templates
//! - [`CopyrightData`] for providing data to fill in templates
//! - [`LicenseKind`] for the built-in license bodies
//!
//! ## Example
//!
//! ```rust
//! use addheader::comment_style::CommentStyle;
//! use addheader::templates::{CopyrightData, LicenseKind, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = CopyrightData {
//!   holder: "Acme".to_string(),
//!   year: "2024".to_string(),
//! };
//!
//! let manager = TemplateManager::from_kind(LicenseKind::Bsd);
//! let header = manager.synthesize(&data, &CommentStyle::line("// "))?;
//! assert!(header.starts_with("// Copyright (c) 2024 Acme"));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use clap::ValueEnum;
use regex::Regex;

use crate::comment_style::CommentStyle;
use crate::verbose_log;

/// Data used to fill out a license template.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightData {
  /// The copyright holder
  pub holder: String,
  /// The copyright year(s)
  pub year: String,
}

/// Error raised while expanding a license template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
  /// The template references a variable that has no binding.
  #[error("unknown template variable '{name}'")]
  UnknownVariable { name: String },

  /// A `{{` was opened but never closed into a valid action.
  #[error("malformed template action starting at byte {offset}")]
  MalformedAction { offset: usize },
}

/// Built-in license bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LicenseKind {
  /// Apache License 2.0
  Apache,
  /// BSD-style notice
  Bsd,
  /// MIT License
  Mit,
  /// Mozilla Public License 2.0 notice
  Mpl,
}

const APACHE_TEMPLATE: &str = r#"Copyright {{year}} {{holder}}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
"#;

const BSD_TEMPLATE: &str = "Copyright (c) {{year}} {{holder}} All rights reserved.
Use of this source code is governed by a BSD-style
license that can be found in the LICENSE file.
";

const MIT_TEMPLATE: &str = r#"Copyright (c) {{year}} {{holder}}

Permission is hereby granted, free of charge, to any person obtaining a copy of
this software and associated documentation files (the "Software"), to deal in
the Software without restriction, including without limitation the rights to
use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
the Software, and to permit persons to whom the Software is furnished to do so,
subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
"#;

const MPL_TEMPLATE: &str = "This Source Code Form is subject to the terms of the Mozilla Public
License, v. 2.0. If a copy of the MPL was not distributed with this
file, You can obtain one at https://mozilla.org/MPL/2.0/.
";

impl LicenseKind {
  /// The template body for this license.
  pub const fn template(self) -> &'static str {
    match self {
      LicenseKind::Apache => APACHE_TEMPLATE,
      LicenseKind::Bsd => BSD_TEMPLATE,
      LicenseKind::Mit => MIT_TEMPLATE,
      LicenseKind::Mpl => MPL_TEMPLATE,
    }
  }
}

/// Matches a template action such as `{{year}}`, `{{ holder }}` or `{{.Year}}`.
static ACTION_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("action regex must compile"));

/// Manager for loading, rendering, and formatting license templates.
#[derive(Debug, Clone)]
pub struct TemplateManager {
  /// The license template content
  template: String,
}

impl TemplateManager {
  /// Creates a manager holding one of the built-in license bodies.
  pub fn from_kind(kind: LicenseKind) -> Self {
    Self {
      template: kind.template().to_string(),
    }
  }

  /// Creates a manager from raw template text, validating it.
  pub fn from_template(template: impl Into<String>) -> Result<Self, TemplateError> {
    let manager = Self {
      template: template.into(),
    };
    manager.validate()?;
    Ok(manager)
  }

  /// Loads a custom license template from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - The file cannot be read or is not valid UTF-8
  /// - The template references an unknown variable or contains a malformed action
  pub fn load_template(path: &Path) -> Result<Self> {
    verbose_log!("Loading template from: {}", path.display());

    let template_content =
      fs::read_to_string(path).with_context(|| format!("Failed to read license template file: {}", path.display()))?;

    Self::from_template(template_content)
      .with_context(|| format!("Invalid license template file: {}", path.display()))
  }

  /// Renders the template once against empty data to surface syntax errors.
  fn validate(&self) -> Result<(), TemplateError> {
    let probe = CopyrightData {
      holder: String::new(),
      year: String::new(),
    };
    self.render(&probe).map(|_| ())
  }

  /// Renders the template, substituting the holder and year.
  pub fn render(&self, data: &CopyrightData) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(self.template.len() + data.holder.len() + data.year.len());
    let mut last = 0;

    for caps in ACTION_REGEX.captures_iter(&self.template) {
      let Some(whole) = caps.get(0) else {
        continue;
      };
      rendered.push_str(check_plain_text(&self.template[last..whole.start()], last)?);

      let name = &caps[1];
      let value = match name.to_lowercase().as_str() {
        "year" => &data.year,
        "holder" => &data.holder,
        _ => {
          return Err(TemplateError::UnknownVariable { name: name.to_string() });
        }
      };
      rendered.push_str(value);
      last = whole.end();
    }

    rendered.push_str(check_plain_text(&self.template[last..], last)?);
    Ok(rendered)
  }

  /// Renders the template and wraps it with the given comment style.
  pub fn synthesize(&self, data: &CopyrightData, style: &CommentStyle) -> Result<String, TemplateError> {
    let text = self.render(data)?;
    Ok(format_with_comment_style(&text, style))
  }
}

/// Text between two actions must not open another one.
fn check_plain_text(text: &str, base: usize) -> Result<&str, TemplateError> {
  match text.find("{{") {
    Some(idx) => Err(TemplateError::MalformedAction { offset: base + idx }),
    None => Ok(text),
  }
}

/// Formats license text with the given comment style.
///
/// Emits the top marker (if any), every body line behind the middle prefix
/// with trailing whitespace removed, the bottom marker (if any), and a final
/// blank line separating the header from the file's own content.
pub fn format_with_comment_style(license_text: &str, style: &CommentStyle) -> String {
  let mut result = String::new();

  if !style.top.is_empty() {
    result.push_str(&style.top);
    result.push('\n');
  }

  for line in license_text.lines() {
    let prefixed = format!("{}{}", style.middle, line);
    result.push_str(prefixed.trim_end());
    result.push('\n');
  }

  if !style.bottom.is_empty() {
    result.push_str(&style.bottom);
    result.push('\n');
  }

  result.push('\n');

  result
}

#[cfg(test)]
mod tests {
  use super::*;

  fn acme() -> CopyrightData {
    CopyrightData {
      holder: "Acme".to_string(),
      year: "2024".to_string(),
    }
  }

  #[test]
  fn test_render_plain_and_dotted_variables() {
    let manager = TemplateManager::from_template("{{year}} {{ holder }} / {{.Year}} {{.Holder}}").expect("valid");
    assert_eq!(manager.render(&acme()).expect("renders"), "2024 Acme / 2024 Acme");
  }

  #[test]
  fn test_render_unknown_variable() {
    let manager = TemplateManager {
      template: "Copyright {{.Owner}}".to_string(),
    };
    assert_eq!(
      manager.render(&acme()),
      Err(TemplateError::UnknownVariable {
        name: "Owner".to_string()
      })
    );
  }

  #[test]
  fn test_from_template_rejects_malformed_action() {
    let err = TemplateManager::from_template("Copyright {{year").expect_err("should fail");
    assert_eq!(err, TemplateError::MalformedAction { offset: 10 });
  }

  #[test]
  fn test_render_does_not_escape_holder() {
    let manager = TemplateManager::from_kind(LicenseKind::Bsd);
    let data = CopyrightData {
      holder: "Smith & Sons <legal>".to_string(),
      year: "2020".to_string(),
    };
    assert!(manager.render(&data).expect("renders").contains("Smith & Sons <legal>"));
  }

  #[test]
  fn test_builtin_templates_validate() {
    for kind in [LicenseKind::Apache, LicenseKind::Bsd, LicenseKind::Mit, LicenseKind::Mpl] {
      assert!(TemplateManager::from_template(kind.template()).is_ok(), "{kind:?}");
    }
  }

  #[test]
  fn test_format_with_line_comment_style() {
    let formatted = format_with_comment_style("Copyright 2024 Acme\n\nAll rights reserved.", &CommentStyle::line("// "));
    assert_eq!(formatted, "// Copyright 2024 Acme\n//\n// All rights reserved.\n\n");
  }

  #[test]
  fn test_format_with_block_comment_style() {
    let style = CommentStyle::block("/*", " * ", " */");
    let formatted = format_with_comment_style("Copyright 2024", &style);
    assert_eq!(formatted, "/*\n * Copyright 2024\n */\n\n");
  }

  #[test]
  fn test_synthesize_apache_for_go() {
    let header = TemplateManager::from_kind(LicenseKind::Apache)
      .synthesize(&acme(), &CommentStyle::line("// "))
      .expect("renders");

    assert!(header.starts_with("// Copyright 2024 Acme\n//\n// Licensed under the Apache License"));
    assert!(header.contains("//     http://www.apache.org/licenses/LICENSE-2.0\n"));
    assert!(header.ends_with("// limitations under the License.\n\n"));
  }
}
