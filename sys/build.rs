use std::path::PathBuf;

/// Locates `libtiledb` and emits the directives which link it.
///
/// The search path is taken from `TILEDB_LIB_DIR`, or from `lib` under
/// `TILEDB_DIR`; otherwise the system linker paths are used.
fn main() {
    println!("cargo::rerun-if-env-changed=TILEDB_DIR");
    println!("cargo::rerun-if-env-changed=TILEDB_LIB_DIR");
    println!("cargo::rerun-if-env-changed=TILEDB_STATIC");

    let lib_dir = std::env::var_os("TILEDB_LIB_DIR")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("TILEDB_DIR").map(|d| PathBuf::from(d).join("lib")));

    if let Some(lib_dir) = lib_dir {
        if !lib_dir.is_dir() {
            println!(
                "cargo::warning=TileDB library directory does not exist: {}",
                lib_dir.display()
            );
        }
        println!("cargo::rustc-link-search=native={}", lib_dir.display());
        println!("cargo::metadata=lib_dir={}", lib_dir.display());
    }

    let kind = if std::env::var_os("TILEDB_STATIC").is_some() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo::rustc-link-lib={kind}=tiledb");
}
