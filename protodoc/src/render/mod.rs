//! Document assembly: preamble, sorted option blocks, trailer.

pub mod rst;

/// Default text placed before the generated blocks.
pub const PREAMBLE: &str = "\
.. Copyright 2016 The Cartographer Authors

.. Licensed under the Apache License, Version 2.0 (the \"License\");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

..      http://www.apache.org/licenses/LICENSE-2.0

.. Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an \"AS IS\" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.

=============
Configuration
=============

.. DO NOT EDIT! This documentation is AUTOGENERATED, please edit .proto files as
.. needed and run protodoc.

";

/// Text placed after the generated blocks.
pub const TRAILER: &str = "\n";

/// Join already sorted blocks into the final document.
///
/// Every block ends in its own blank line; one more blank line separates
/// consecutive blocks.
pub fn assemble<'a>(preamble: &str, blocks: impl IntoIterator<Item = &'a str>) -> String {
    let body = blocks.into_iter().collect::<Vec<_>>().join("\n\n");

    let mut output = String::with_capacity(preamble.len() + body.len() + TRAILER.len() + 1);
    output.push_str(preamble);
    output.push_str(&body);
    output.push('\n');
    output.push_str(TRAILER);
    output
}
