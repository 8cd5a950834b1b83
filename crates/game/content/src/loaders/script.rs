//! Action script loader.
//!
//! Scripts list action tokens separated by whitespace. `//` starts a comment
//! that runs to the end of the line. Tokens are returned verbatim; validating
//! them is left to the runtime so unknown tokens are reported where they are
//! executed.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};

/// Loader for action scripts.
pub struct ScriptLoader;

impl ScriptLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let content = read_file(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(|line| line.split_once("//").map_or(line, |(code, _)| code))
            .flat_map(str::split_whitespace)
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tokens_and_strips_comments() {
        let script = "moveright pickup // grab the sword\n\n  swingup\twait\n// done\nbogus";
        assert_eq!(
            ScriptLoader::parse(script),
            vec!["moveright", "pickup", "swingup", "wait", "bogus"]
        );
    }
}
