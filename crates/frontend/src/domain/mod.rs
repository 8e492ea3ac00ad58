pub mod a001_sbom;
pub mod a002_package;
pub mod a003_advisory;
pub mod a004_vulnerability;
pub mod a005_importer;
pub mod a006_license;
