use std::path::Path;

use crate::{error, info, utils, warning};

/// Prints the search query the front-end issues for each entry of a `.m3u` file.
pub async fn preview(file: &Path) {
    let content = match async_fs::read_to_string(file).await {
        Ok(content) => content,
        Err(e) => error!("Cannot read {}: {}", file.display(), e),
    };

    let tracks = utils::parse_m3u(&content);
    if tracks.is_empty() {
        warning!("No tracks found in {}", file.display());
        return;
    }

    info!("{} tracks in {}", tracks.len(), file.display());
    for (index, track) in tracks.iter().enumerate() {
        println!("{:>4}. {}", index + 1, track.search_text());
    }
}
