use super::*;

#[test]
fn test_normalize_path() {
    let path = Path::new("/a/b/../c/./d");
    assert_eq!(normalize_path(path), Path::new("/a/c/d"));

    let path = Path::new("/a/../c/./d");
    assert_eq!(normalize_path(path), Path::new("/c/d"));
}

#[test]
fn test_absolutize_relative() {
    let path = absolutize_path("checkouts/../src/project");
    assert_eq!(path, normalize_path(CWD.join("src/project")));
    assert!(path.is_absolute());
}

#[test]
#[cfg(unix)]
fn test_path_to_url() {
    let url = path_to_url("/srv/bzr/project").unwrap();
    assert_eq!(url.as_str(), "file:///srv/bzr/project");

    let url = path_to_url("/srv/bzr/./other/../project").unwrap();
    assert_eq!(url.as_str(), "file:///srv/bzr/project");

    let url = path_to_url("/srv/with space").unwrap();
    assert_eq!(url.as_str(), "file:///srv/with%20space");
}

#[test]
fn test_is_local_path() {
    assert!(is_local_path("/srv/bzr/project"));
    assert!(!is_local_path("bzr+ssh://example.com/repo"));
    assert!(!is_local_path("http://bazaar.launchpad.net/~user/project/trunk/"));
    assert!(!is_local_path("lp:project"));
    if cfg!(windows) {
        assert!(is_local_path("C:\\Users\\ferris\\project"));
    }
}

#[test]
fn test_user_display_relativizes() {
    let nested = CWD.join("nested").join("checkout");
    assert_eq!(
        nested.user_display().to_string(),
        Path::new("nested").join("checkout").display().to_string()
    );
}
