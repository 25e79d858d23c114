// ABOUTME: CLI argument definitions for the Imgur CLI application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "imgur")]
#[command(about = "Look up and upload images on Imgur", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty print JSON output
    #[arg(long, global = true, requires = "json")]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve an imgur URL to the image or album it points at
    Resolve {
        /// Any imgur.com, m.imgur.com or i.imgur.com URL
        url: String,
    },
    /// Show details for an image
    Image {
        /// Image id (e.g., aBc123)
        id: String,
    },
    /// Show details for an album
    Album {
        /// Album id
        id: String,
    },
    /// Show details for an image published to the gallery
    GalleryImage {
        /// Gallery image id
        id: String,
    },
    /// Show details for an album published to the gallery
    GalleryAlbum {
        /// Gallery album id
        id: String,
    },
    /// Upload an image anonymously
    Upload {
        /// Image file to upload
        #[arg(required_unless_present = "url", conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Let imgur fetch the image from this URL instead
        #[arg(long)]
        url: Option<String>,

        /// Album id (or deletehash for anonymous albums) to add the image to
        #[arg(long)]
        album: Option<String>,

        /// Image title
        #[arg(long)]
        title: Option<String>,

        /// Image description
        #[arg(long)]
        description: Option<String>,
    },
    /// Show the remaining request quota
    Rate,
}
