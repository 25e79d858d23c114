// ABOUTME: Centralized constants for the Imgur SDK
// ABOUTME: Contains API base URLs, header names, timeouts and upload type tokens

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Imgur API URLs
pub mod urls {
    /// Base URL for direct Imgur v3 API calls
    pub const IMGUR_API_BASE: &str = "https://api.imgur.com/3/";

    /// Base URL used when requests are routed through RapidAPI
    pub const RAPIDAPI_BASE: &str = "https://imgur-apiv3.p.rapidapi.com/3/";

    /// Host value RapidAPI expects in `X-RapidAPI-Host`
    pub const RAPIDAPI_HOST: &str = "imgur-apiv3.p.rapidapi.com";
}

/// Request and response header names
pub mod headers {
    pub const RAPIDAPI_HOST: &str = "x-rapidapi-host";
    pub const RAPIDAPI_KEY: &str = "x-rapidapi-key";

    pub const USER_LIMIT: &str = "x-ratelimit-userlimit";
    pub const USER_REMAINING: &str = "x-ratelimit-userremaining";
    pub const USER_RESET: &str = "x-ratelimit-userreset";
    pub const CLIENT_LIMIT: &str = "x-ratelimit-clientlimit";
    pub const CLIENT_REMAINING: &str = "x-ratelimit-clientremaining";

    /// Default User-Agent sent by the reqwest transport
    pub const DEFAULT_USER_AGENT: &str = concat!("imgur-sdk/", env!("CARGO_PKG_VERSION"));
}

/// API paths relative to the base URL
pub mod paths {
    pub const ALBUM: &str = "album/";
    pub const IMAGE: &str = "image/";
    pub const GALLERY_IMAGE: &str = "gallery/image/";
    pub const GALLERY_ALBUM: &str = "gallery/album/";
    pub const UPLOAD: &str = "image";

    /// Cheap authenticated endpoint probed for quota headers
    pub const CREDITS: &str = "credits";
}
