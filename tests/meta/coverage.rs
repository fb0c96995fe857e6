//! Keeps `tests/unit/` in step with the module tree under `src/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Module directories declared by `src/lib.rs`
    const MODULE_DIRS: [&str; 4] = ["algorithm", "io", "math", "spatial"];

    /// Stems of the `.rs` files directly inside `dir`, without `mod.rs`
    fn source_stems(dir: &Path) -> io::Result<BTreeSet<String>> {
        let mut stems = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
                && stem != "mod"
            {
                stems.insert(stem.to_owned());
            }
        }
        Ok(stems)
    }

    /// Names of the subdirectories of `dir`
    fn subdirectories(dir: &Path) -> io::Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir()
                && let Some(name) = path.file_name().and_then(|name| name.to_str())
            {
                names.insert(name.to_owned());
            }
        }
        Ok(names)
    }

    fn declares(content: &str, declaration: &str) -> bool {
        content.lines().any(|line| line.trim() == declaration)
    }

    // Tests src holds exactly the module directories the unit tree mirrors
    // Verified by adding an extra directory under src
    #[test]
    fn test_module_dirs_are_mirrored() {
        let expected: BTreeSet<String> = MODULE_DIRS.iter().map(|&dir| dir.to_owned()).collect();

        let src_dirs = subdirectories(Path::new("src")).expect("src is readable");
        let unit_dirs = subdirectories(Path::new("tests/unit")).expect("tests/unit is readable");

        assert_eq!(src_dirs, expected, "module directories under src/");
        assert_eq!(unit_dirs, expected, "module directories under tests/unit/");
    }

    // Tests every source file has a unit test file and every test file a source
    // Verified by deleting tests/unit/algorithm/selection.rs
    #[test]
    fn test_source_and_unit_files_match() {
        let mut missing = Vec::new();
        let mut orphaned = Vec::new();

        for dir in MODULE_DIRS {
            let src = source_stems(&Path::new("src").join(dir)).expect("src module is readable");
            let unit = source_stems(&Path::new("tests/unit").join(dir))
                .expect("unit test module is readable");

            missing.extend(
                src.difference(&unit)
                    .map(|stem| format!("  - src/{dir}/{stem}.rs -> tests/unit/{dir}/{stem}.rs")),
            );
            orphaned.extend(
                unit.difference(&src)
                    .map(|stem| format!("  - tests/unit/{dir}/{stem}.rs has no src/{dir}/{stem}.rs")),
            );
        }

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
        assert!(
            orphaned.is_empty(),
            "Unit test files without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every file is declared by its parent module so none is silently skipped
    // Verified by removing `pub mod scheduler;` from the unit algorithm module
    #[test]
    fn test_files_are_declared_as_modules() {
        let lib = fs::read_to_string("src/lib.rs").expect("lib.rs is readable");
        let unit_root = fs::read_to_string("tests/unit/mod.rs").expect("unit root is readable");
        let mut undeclared = Vec::new();

        for dir in MODULE_DIRS {
            if !declares(&lib, &format!("pub mod {dir};")) {
                undeclared.push(format!("  - src/lib.rs: pub mod {dir};"));
            }
            if !declares(&unit_root, &format!("mod {dir};")) {
                undeclared.push(format!("  - tests/unit/mod.rs: mod {dir};"));
            }

            let src_mod = fs::read_to_string(Path::new("src").join(dir).join("mod.rs"))
                .expect("src module file is readable");
            let unit_mod = fs::read_to_string(Path::new("tests/unit").join(dir).join("mod.rs"))
                .expect("unit module file is readable");
            let stems = source_stems(&Path::new("src").join(dir)).expect("src module is readable");

            for stem in stems {
                if !declares(&src_mod, &format!("pub mod {stem};")) {
                    undeclared.push(format!("  - src/{dir}/mod.rs: pub mod {stem};"));
                }
                if !declares(&unit_mod, &format!("pub mod {stem};")) {
                    undeclared.push(format!("  - tests/unit/{dir}/mod.rs: pub mod {stem};"));
                }
            }
        }

        assert!(
            undeclared.is_empty(),
            "Missing module declarations:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests the end-to-end suite and every unit file hold at least one test
    // Verified by emptying tests/unit/math/probability.rs
    #[test]
    fn test_test_files_contain_tests() {
        let mut files = vec![Path::new("tests/algorithm.rs").to_path_buf()];
        for dir in MODULE_DIRS {
            let unit_dir = Path::new("tests/unit").join(dir);
            let stems = source_stems(&unit_dir).expect("unit test module is readable");
            files.extend(stems.iter().map(|stem| unit_dir.join(format!("{stem}.rs"))));
        }

        let empty: Vec<String> = files
            .iter()
            .filter(|path| {
                !fs::read_to_string(path).is_ok_and(|content| content.contains("#[test]"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
