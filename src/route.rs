//! Hash routes of the page shell. The game lives at `#/game`; `#/` is a placeholder
//! home page.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Game,
    NotFound,
}

impl Route {
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        let path = path.split('?').next().unwrap_or("");
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/game" => Route::Game,
            _ => Route::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_hash_routes() {
        assert_eq!(Route::from_hash(""), Route::Home);
        assert_eq!(Route::from_hash("#"), Route::Home);
        assert_eq!(Route::from_hash("#/"), Route::Home);
        assert_eq!(Route::from_hash("#/game"), Route::Game);
        assert_eq!(Route::from_hash("#/game/"), Route::Game);
        assert_eq!(Route::from_hash("#/game?debug=1"), Route::Game);
        assert_eq!(Route::from_hash("#/scores"), Route::NotFound);
    }
}
