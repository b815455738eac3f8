//! # Content Transformer Module
//!
//! This module places a synthesized header into file content while keeping
//! interpreter and declaration lines (shebangs, XML declarations, etc.) as the
//! file's first line.
//!
//! The transformation is textual. It looks at the first physical line only and
//! never parses the target language.

/// First-line prefixes that must stay on the first line, compared against the
/// case-folded line.
const PREAMBLE_PREFIXES: &[&[u8]] = &[
  b"#!",                       // shebang
  b"<?xml",                    // XML declaration
  b"<!doctype",                // HTML doctype
  b"# encoding:",              // Ruby encoding
  b"# frozen_string_literal:", // Ruby interpreter instruction
  b"<?php",                    // PHP opening tag
];

/// Content transformation utilities for header insertion.
pub struct ContentTransformer;

impl ContentTransformer {
  /// Splits off a preamble line from the start of `content`.
  ///
  /// The first physical line runs up to and including the first `\n`, or is
  /// the whole content when there is no newline. If that line, case-folded,
  /// starts with a recognized prefix it is returned as the preamble.
  ///
  /// # Returns
  ///
  /// A tuple containing:
  /// - The preamble line, if any (including its newline when present)
  /// - The remaining content
  pub fn extract_preamble(content: &[u8]) -> (Option<&[u8]>, &[u8]) {
    let line_end = content
      .iter()
      .position(|&b| b == b'\n')
      .map_or(content.len(), |idx| idx + 1);
    let (first_line, rest) = content.split_at(line_end);

    let folded = first_line.to_ascii_lowercase();
    if PREAMBLE_PREFIXES.iter().any(|prefix| folded.starts_with(prefix)) {
      (Some(first_line), rest)
    } else {
      (None, content)
    }
  }

  /// Builds the new content with `header` inserted.
  ///
  /// The result is `preamble ++ header ++ rest` when a preamble line exists
  /// (a missing newline after the preamble is added), and `header ++ content`
  /// otherwise.
  pub fn insert_header(content: &[u8], header: &[u8]) -> Vec<u8> {
    let (preamble, rest) = Self::extract_preamble(content);
    let preamble = preamble.unwrap_or_default();

    let mut out = Vec::with_capacity(preamble.len() + 1 + header.len() + rest.len());
    out.extend_from_slice(preamble);
    if !preamble.is_empty() && !preamble.ends_with(b"\n") {
      out.push(b'\n');
    }
    out.extend_from_slice(header);
    out.extend_from_slice(rest);
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &[u8] = b"# Copyright 2024 Acme\n\n";

  #[test]
  fn test_extract_preamble_shebang() {
    let (preamble, rest) = ContentTransformer::extract_preamble(b"#!/bin/sh\necho hi\n");
    assert_eq!(preamble, Some(&b"#!/bin/sh\n"[..]));
    assert_eq!(rest, b"echo hi\n");
  }

  #[test]
  fn test_extract_preamble_is_case_insensitive() {
    let (preamble, _) = ContentTransformer::extract_preamble(b"<!DOCTYPE html>\n<html></html>\n");
    assert_eq!(preamble, Some(&b"<!DOCTYPE html>\n"[..]));

    let (preamble, _) = ContentTransformer::extract_preamble(b"<?XML version=\"1.0\"?>\n<root/>\n");
    assert!(preamble.is_some());
  }

  #[test]
  fn test_extract_preamble_ruby_pragmas_and_php() {
    for first in [
      &b"# encoding: utf-8\n"[..],
      b"# frozen_string_literal: true\n",
      b"<?php\n",
    ] {
      let mut content = first.to_vec();
      content.extend_from_slice(b"body\n");
      let (preamble, rest) = ContentTransformer::extract_preamble(&content);
      assert_eq!(preamble, Some(first));
      assert_eq!(rest, b"body\n");
    }
  }

  #[test]
  fn test_extract_preamble_none() {
    let content = b"package main\n";
    let (preamble, rest) = ContentTransformer::extract_preamble(content);
    assert_eq!(preamble, None);
    assert_eq!(rest, content);
  }

  #[test]
  fn test_preamble_only_on_first_line() {
    let content = b"echo one\n#!/bin/sh\n";
    let (preamble, _) = ContentTransformer::extract_preamble(content);
    assert_eq!(preamble, None);
  }

  #[test]
  fn test_insert_after_shebang() {
    let out = ContentTransformer::insert_header(b"#!/bin/sh\necho hi\n", HEADER);
    assert_eq!(out, b"#!/bin/sh\n# Copyright 2024 Acme\n\necho hi\n");
  }

  #[test]
  fn test_insert_after_shebang_without_newline() {
    let out = ContentTransformer::insert_header(b"#!/bin/sh", HEADER);
    assert_eq!(out, b"#!/bin/sh\n# Copyright 2024 Acme\n\n");
  }

  #[test]
  fn test_insert_without_preamble() {
    let out = ContentTransformer::insert_header(b"package main\n", b"// Copyright\n\n");
    assert_eq!(out, b"// Copyright\n\npackage main\n");
  }

  #[test]
  fn test_insert_into_empty_content() {
    let out = ContentTransformer::insert_header(b"", b"// Copyright\n\n");
    assert_eq!(out, b"// Copyright\n\n");
  }

  #[test]
  fn test_insert_keeps_non_utf8_bytes() {
    let out = ContentTransformer::insert_header(b"\xff\xfebinary-ish\n", b"// C\n\n");
    assert_eq!(out, b"// C\n\n\xff\xfebinary-ish\n");
  }
}
