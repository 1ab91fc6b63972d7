use proptest::prelude::*;
use repomap_fs::checksum::compute_path_digest;
use std::path::Path;

proptest! {
    #[test]
    fn distinct_paths_have_distinct_digests(a in "[a-z/]{1,40}", b in "[a-z/]{1,40}") {
        prop_assume!(a != b);
        let da = compute_path_digest(Path::new(&a));
        let db = compute_path_digest(Path::new(&b));
        prop_assert_ne!(da, db);
    }

    #[cfg(unix)]
    #[test]
    fn backslash_variants_have_distinct_digests(parts in prop::collection::vec("[a-z]{1,8}", 2..5)) {
        let slashed = format!("/p/{}", parts.join("/"));
        let backslashed = format!("/p/{}", parts.join("\\"));
        prop_assert_ne!(
            compute_path_digest(Path::new(&slashed)),
            compute_path_digest(Path::new(&backslashed))
        );
    }

    #[test]
    fn digest_is_lowercase_hex(s in "[a-zA-Z0-9/._-]{1,60}") {
        let digest = compute_path_digest(Path::new(&s));
        prop_assert_eq!(digest.len(), 64);
        prop_assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
