//! Binary file detection by file-name suffix.
//!
//! Detection is a case-sensitive suffix match on the file name. File contents
//! are never inspected, so a matching file is skipped without being opened.

/// File-name suffixes (and a few whole file names) whose content is never
/// decoded as text.
pub const BINARY_SUFFIXES: &[&str] = &[
    ".exe", ".dll", ".so", ".a", ".lib", ".dylib", ".o", ".obj", ".zip", ".tar", ".tar.gz", ".tgz",
    ".rar", ".7z", ".bz2", ".gz", ".xz", ".z", ".lz", ".lzma", ".lzo", ".rz", ".sz", ".dz", ".pdf",
    ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".ods", ".odp", ".png", ".jpg",
    ".jpeg", ".gif", ".mp3", ".mp4", ".wav", ".flac", ".ogg", ".avi", ".mkv", ".mov", ".webm",
    ".wmv", ".m4a", ".aac", ".iso", ".vmdk", ".qcow2", ".vdi", ".vhd", ".vhdx", ".ova", ".ovf",
    ".db", ".sqlite", ".mdb", ".accdb", ".frm", ".ibd", ".dbf", ".jar", ".class", ".war", ".ear",
    ".jpi", ".pyc", ".pyo", ".pyd", ".egg", ".whl", ".deb", ".rpm", ".apk", ".msi", ".dmg", ".pkg",
    ".bin", ".dat", ".data", ".dump", ".img", ".toast", ".vcd", ".crx", ".xpi", ".lockb",
    "package-lock.json", ".svg", ".eot", ".otf", ".ttf", ".woff", ".woff2", ".ico", ".icns",
    ".cur", ".cab", ".dmp", ".msp", ".msm", ".keystore", ".jks", ".truststore", ".cer", ".crt",
    ".der", ".p7b", ".p7c", ".p12", ".pfx", ".pem", ".csr", ".key", ".pub", ".sig", ".pgp", ".gpg",
    ".nupkg", ".snupkg", ".appx", ".msix", ".msu", ".snap", ".flatpak", ".appimage", ".ko", ".sys",
    ".elf", ".swf", ".fla", ".swc", ".rlib", ".pdb", ".idb", ".dbg", ".sdf", ".bak", ".tmp",
    ".temp", ".log", ".tlog", ".ilk", ".bpl", ".dcu", ".dcp", ".dcpil", ".drc", ".aps", ".res",
    ".rsrc", ".rc", ".resx", ".prefs", ".properties", ".ini", ".cfg", ".config", ".conf",
    ".DS_Store", ".localized", ".svn", ".git", ".gitignore", ".gitkeep",
];

/// Returns true if `file_name` ends with any known binary suffix.
pub fn is_binary_name(file_name: &str) -> bool {
    BINARY_SUFFIXES.iter().any(|suffix| file_name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::{is_binary_name, BINARY_SUFFIXES};
    use std::collections::HashSet;

    #[test]
    fn matches_known_suffixes_and_exact_names() {
        assert!(is_binary_name("logo.png"));
        assert!(is_binary_name("release.tar.gz"));
        assert!(is_binary_name("package-lock.json"));
        assert!(is_binary_name(".gitignore"));
        assert!(is_binary_name("app.config"));
    }

    #[test]
    fn text_files_are_not_binary() {
        assert!(!is_binary_name("main.rs"));
        assert!(!is_binary_name("README.md"));
        assert!(!is_binary_name("package.json"));
        assert!(!is_binary_name("png"));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(!is_binary_name("PHOTO.PNG"));
        assert!(is_binary_name("photo.png"));
        assert!(!is_binary_name("thumbs.ds_store"));
    }

    #[test]
    fn suffix_table_has_no_duplicates() {
        let unique: HashSet<&str> = BINARY_SUFFIXES.iter().copied().collect();
        assert_eq!(unique.len(), BINARY_SUFFIXES.len());
        assert!(BINARY_SUFFIXES.len() > 150);
    }
}
