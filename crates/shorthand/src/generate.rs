//! The generation pipeline: classify, validate, render, aggregate, write
//!
//! Per-file processing is a short-circuiting fold: the first line that
//! fails validation abandons the whole file, discarding any output
//! accumulated for it. A rejected file contributes nothing to any
//! artifact; the run continues with the next file.

use crate::classify::{classify_line, Declaration};
use crate::config::ShorthandConfig;
use crate::error::Result;
use crate::{render, scanner};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file contributed nothing to the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Input path lacks the `.h` extension
    NotAHeader,
    /// `@interface` names an object outside the allow-list
    UnknownObject(String),
    /// A method declaration lacks the reserved prefix
    UnprefixedMethod(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAHeader => write!(f, "not a header file"),
            Self::UnknownObject(object) => {
                write!(f, "unrecognized declaring object {}", object)
            }
            Self::UnprefixedMethod(name) => write!(f, "unprefixed method {}", name),
        }
    }
}

/// Result of processing one header
#[derive(Debug)]
pub enum FileOutcome {
    Generated(GeneratedFile),
    Skipped(SkipReason),
}

/// Rendered lines for one accepted header
#[derive(Debug)]
pub struct GeneratedFile {
    pub header: Vec<String>,
    pub implementation: Vec<String>,
    pub methods: usize,
}

/// Result of annotating one header in place
#[derive(Debug)]
pub enum AnnotateOutcome {
    Annotated { content: String, changed: bool },
    Skipped(SkipReason),
}

/// Process one header into its shorthand header and implementation lines
pub fn process_file(path: &Path, config: &ShorthandConfig) -> Result<FileOutcome> {
    if path.extension().and_then(|e| e.to_str()) != Some("h") {
        return Ok(FileOutcome::Skipped(SkipReason::NotAHeader));
    }

    let content = std::fs::read_to_string(path)?;
    let mut header = Vec::new();
    let mut implementation = Vec::new();
    let mut methods = 0;

    for line in content.lines() {
        let decl = classify_line(line);

        match &decl {
            Declaration::InterfaceOpen { object, .. } => {
                if !config.allows_object(object) {
                    return Ok(FileOutcome::Skipped(SkipReason::UnknownObject(
                        object.clone(),
                    )));
                }
            }
            Declaration::Method(sig) => {
                if !sig.name.starts_with(&config.prefix) {
                    return Ok(FileOutcome::Skipped(SkipReason::UnprefixedMethod(
                        sig.name.clone(),
                    )));
                }
                methods += 1;
            }
            _ => {}
        }

        if let Some(rendered) = render::shorthand_header(&decl, config) {
            header.push(rendered);
        }
        if let Some(rendered) = render::shorthand_implementation(&decl, config) {
            implementation.push(rendered);
        }
    }

    Ok(FileOutcome::Generated(GeneratedFile {
        header,
        implementation,
        methods,
    }))
}

/// Rewrite one header's content with deprecation annotations
///
/// The same validation applies as for generation: a file with an
/// unrecognized object or an unprefixed method is left untouched.
pub fn annotate_file(path: &Path, config: &ShorthandConfig) -> Result<AnnotateOutcome> {
    if path.extension().and_then(|e| e.to_str()) != Some("h") {
        return Ok(AnnotateOutcome::Skipped(SkipReason::NotAHeader));
    }

    let original = std::fs::read_to_string(path)?;
    let mut lines = Vec::new();

    for line in original.lines() {
        let decl = classify_line(line);

        match &decl {
            Declaration::InterfaceOpen { object, .. } => {
                if !config.allows_object(object) {
                    return Ok(AnnotateOutcome::Skipped(SkipReason::UnknownObject(
                        object.clone(),
                    )));
                }
            }
            Declaration::Method(sig) => {
                if !sig.name.starts_with(&config.prefix) {
                    return Ok(AnnotateOutcome::Skipped(SkipReason::UnprefixedMethod(
                        sig.name.clone(),
                    )));
                }
            }
            _ => {}
        }

        lines.push(render::deprecation_annotated(line, &decl, config));
    }

    let mut content = lines.join("\n");
    if original.ends_with('\n') {
        content.push('\n');
    }
    let changed = content != original;

    Ok(AnnotateOutcome::Annotated { content, changed })
}

/// One processed file in the run report
#[derive(Debug, Serialize)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub methods: usize,
}

/// One skipped file in the run report
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a generation run
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    pub processed: Vec<ProcessedFile>,
    pub skipped: Vec<SkippedFile>,
    pub header_path: Option<PathBuf>,
    pub implementation_path: Option<PathBuf>,
    pub annotated: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn methods_total(&self) -> usize {
        self.processed.iter().map(|f| f.methods).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Print a human-readable summary
    pub fn print(&self) {
        println!();
        println!("{}", "Shorthand Generation".bold());
        println!("{}", "====================".bold());
        println!();

        for file in &self.processed {
            println!(
                "  {} {} ({} methods)",
                "✓".green(),
                file.path.display(),
                file.methods
            );
        }
        for file in &self.skipped {
            println!(
                "  {} {} ({})",
                "•".yellow(),
                file.path.display(),
                file.reason
            );
        }

        println!();
        println!(
            "  {} files, {} methods",
            self.processed.len(),
            self.methods_total()
        );
        if let Some(path) = &self.header_path {
            println!("  {} {}", "→".green(), path.display());
        }
        if let Some(path) = &self.implementation_path {
            println!("  {} {}", "→".green(), path.display());
        }
        for path in &self.annotated {
            println!("  {} annotated {}", "✎".cyan(), path.display());
        }
        println!();
    }
}

/// Drives the walk → classify → render → write pipeline
pub struct Generator {
    config: ShorthandConfig,
}

impl Generator {
    pub fn new(config: ShorthandConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShorthandConfig {
        &self.config
    }

    /// Generate the shorthand header/implementation pair for every
    /// category header beneath `input`
    pub fn run(&self, input: &Path, output_base: &Path) -> Result<GenerationReport> {
        let headers = scanner::find_category_headers(input)?;

        let mut report = GenerationReport::default();
        let mut generated = Vec::new();

        for path in headers {
            match process_file(&path, &self.config)? {
                FileOutcome::Generated(file) => {
                    report.processed.push(ProcessedFile {
                        path: path.clone(),
                        methods: file.methods,
                    });
                    generated.push(file);
                }
                FileOutcome::Skipped(reason) => {
                    eprintln!("{} {}: {}", "skipped".yellow(), path.display(), reason);
                    report.skipped.push(SkippedFile {
                        path,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        let (header_path, implementation_path) = self.write_outputs(&generated, output_base)?;
        report.header_path = Some(header_path);
        report.implementation_path = Some(implementation_path);

        Ok(report)
    }

    /// Rewrite every accepted header beneath `input` with deprecation
    /// annotations; returns the paths that changed
    pub fn annotate(&self, input: &Path, dry_run: bool) -> Result<Vec<PathBuf>> {
        let headers = scanner::find_category_headers(input)?;
        let mut annotated = Vec::new();

        for path in headers {
            match annotate_file(&path, &self.config)? {
                AnnotateOutcome::Annotated { content, changed } => {
                    if changed {
                        if !dry_run {
                            std::fs::write(&path, content)?;
                        }
                        annotated.push(path);
                    }
                }
                AnnotateOutcome::Skipped(reason) => {
                    eprintln!("{} {}: {}", "skipped".yellow(), path.display(), reason);
                }
            }
        }

        Ok(annotated)
    }

    fn write_outputs(
        &self,
        generated: &[GeneratedFile],
        output_base: &Path,
    ) -> Result<(PathBuf, PathBuf)> {
        let header_path = PathBuf::from(format!("{}.h", output_base.display()));
        let implementation_path = PathBuf::from(format!("{}.m", output_base.display()));

        let header_name = header_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.h", output_base.display()));

        let flag = &self.config.shorthand_flag;

        let mut header = format!("#ifdef {}\n\n", flag);
        for import in &self.config.header_imports {
            header.push_str(&format!("#import \"{}\"\n", import));
        }
        header.push('\n');
        header.push_str(&join_rendered(generated, |f| &f.header));
        header.push_str("#endif\n");

        let mut implementation = format!("#ifdef {}\n\n", flag);
        implementation.push_str(&format!("#import \"{}\"\n", header_name));
        implementation.push_str(&format!(
            "#import \"{}\"\n\n",
            self.config.implementation_import
        ));
        implementation.push_str(&join_rendered(generated, |f| &f.implementation));
        implementation.push_str("#endif\n");

        std::fs::write(&header_path, header)?;
        std::fs::write(&implementation_path, implementation)?;

        Ok((header_path, implementation_path))
    }
}

fn join_rendered<F>(generated: &[GeneratedFile], select: F) -> String
where
    F: Fn(&GeneratedFile) -> &Vec<String>,
{
    generated
        .iter()
        .map(|f| select(f).join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FINDERS_HEADER: &str = "\
//  NSManagedObject+MagicalFinders.h

#import <CoreData/CoreData.h>

@interface NSManagedObject (MagicalFinders)

+ (NSArray *)MR_findAll;
+ (NSArray *)MR_findByAttribute:(NSString *)attribute withValue:(id)value;

@end
";

    fn config() -> ShorthandConfig {
        ShorthandConfig::default()
    }

    fn write_header(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_process_file_generates_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "NSManagedObject+MagicalFinders.h", FINDERS_HEADER);

        let outcome = process_file(&path, &config()).unwrap();
        let FileOutcome::Generated(file) = outcome else {
            panic!("expected generated output");
        };

        assert_eq!(file.methods, 2);
        let header = file.header.join("\n");
        assert!(header.contains("@interface NSManagedObject (MagicalFindersShortHand)"));
        assert!(header.contains("+ (NSArray *)findAll;"));
        assert!(!header.contains("#import"));

        let implementation = file.implementation.join("\n");
        assert!(implementation.contains("@implementation NSManagedObject (MagicalFindersShortHand)"));
        assert!(implementation.contains("return [self MR_findAll];"));
        assert!(implementation.contains("return [self MR_findByAttribute:attribute withValue:value];"));
    }

    #[test]
    fn test_unknown_object_abandons_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(
            dir.path(),
            "NSArray+Helpers.h",
            "@interface NSArray (Helpers)\n- (id)MR_firstObject;\n@end\n",
        );

        let outcome = process_file(&path, &config()).unwrap();
        assert!(matches!(
            outcome,
            FileOutcome::Skipped(SkipReason::UnknownObject(ref o)) if o.as_str() == "NSArray"
        ));
    }

    #[test]
    fn test_unprefixed_method_abandons_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(
            dir.path(),
            "NSManagedObject+Mixed.h",
            "@interface NSManagedObject (Mixed)\n\
             + (NSArray *)MR_findAll;\n\
             + (NSArray *)findAllSorted;\n\
             @end\n",
        );

        let outcome = process_file(&path, &config()).unwrap();
        assert!(matches!(
            outcome,
            FileOutcome::Skipped(SkipReason::UnprefixedMethod(ref m)) if m.as_str() == "findAllSorted"
        ));
    }

    #[test]
    fn test_non_header_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "notes.txt", "hello");

        let outcome = process_file(&path, &config()).unwrap();
        assert!(matches!(outcome, FileOutcome::Skipped(SkipReason::NotAHeader)));
    }

    #[test]
    fn test_run_writes_guarded_pair() {
        let dir = tempfile::tempdir().unwrap();
        write_header(dir.path(), "NSManagedObject+MagicalFinders.h", FINDERS_HEADER);

        let out = tempfile::tempdir().unwrap();
        let base = out.path().join("MagicalRecordShorthand");

        let generator = Generator::new(config());
        let report = generator.run(dir.path(), &base).unwrap();

        assert_eq!(report.processed.len(), 1);
        assert_eq!(report.methods_total(), 2);

        let header = fs::read_to_string(base.with_extension("h")).unwrap();
        assert!(header.starts_with("#ifdef MR_SHORTHAND\n"));
        assert!(header.ends_with("#endif\n"));
        assert!(header.contains("#import \"MagicalRecordDeprecated.h\""));
        assert!(header.contains("#import \"NSManagedObjectContext+MagicalSaves.h\""));
        assert!(header.contains("+ (NSArray *)findAll;"));

        let implementation = fs::read_to_string(base.with_extension("m")).unwrap();
        assert!(implementation.starts_with("#ifdef MR_SHORTHAND\n"));
        assert!(implementation.contains("#import \"MagicalRecordShorthand.h\""));
        assert!(implementation.contains("#import \"CoreData+MagicalRecord.h\""));
        assert!(implementation.contains("return [self MR_findAll];"));
    }

    #[test]
    fn test_rejected_file_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_header(dir.path(), "NSManagedObject+MagicalFinders.h", FINDERS_HEADER);
        write_header(
            dir.path(),
            "NSArray+Helpers.h",
            "@interface NSArray (Helpers)\n- (id)MR_firstObject;\n@end\n",
        );

        let out = tempfile::tempdir().unwrap();
        let base = out.path().join("Shorthand");

        let generator = Generator::new(config());
        let report = generator.run(dir.path(), &base).unwrap();

        assert_eq!(report.processed.len(), 1);
        assert_eq!(report.skipped.len(), 1);

        let header = fs::read_to_string(base.with_extension("h")).unwrap();
        let implementation = fs::read_to_string(base.with_extension("m")).unwrap();
        assert!(!header.contains("firstObject"));
        assert!(!header.contains("NSArray (Helpers"));
        assert!(!implementation.contains("firstObject"));
    }

    #[test]
    fn test_annotate_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "NSManagedObject+MagicalFinders.h", FINDERS_HEADER);

        let generator = Generator::new(config());
        let annotated = generator.annotate(dir.path(), false).unwrap();
        assert_eq!(annotated, vec![path.clone()]);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(
            "+ (NSArray *)MR_findAll; MRDeprecated(\"Use MR_findAll instead\");"
        ));
        // untouched lines stay verbatim
        assert!(content.contains("#import <CoreData/CoreData.h>"));
        assert!(content.contains("@interface NSManagedObject (MagicalFinders)"));
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "NSManagedObject+MagicalFinders.h", FINDERS_HEADER);

        let generator = Generator::new(config());
        generator.annotate(dir.path(), false).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let second_pass = generator.annotate(dir.path(), false).unwrap();
        assert!(second_pass.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_annotate_dry_run_leaves_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "NSManagedObject+MagicalFinders.h", FINDERS_HEADER);

        let generator = Generator::new(config());
        let annotated = generator.annotate(dir.path(), true).unwrap();
        assert_eq!(annotated, vec![path.clone()]);
        assert_eq!(fs::read_to_string(&path).unwrap(), FINDERS_HEADER);
    }
}
