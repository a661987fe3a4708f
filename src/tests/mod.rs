#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};
    use std::fs;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    use crate::class::{
        ClassProcessor,
        types::ClassScanOptions,
    };
    use crate::class::processor::FilterPolicy;
    use crate::safelist::{SafelistOperations, SafelistStorage};

    // Helper function to create a test source file
    fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let file_path = dir.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    fn classes(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn project() -> Result<TempDir> {
        let dir = tempdir()?;

        create_test_file(dir.path(), "components/Card.tsx", r#"
        import { cn } from "../lib/utils";

        export function Card({ tone, className }: Props) {
            return (
                <div className={cn("rounded-lg border p-4", className)}>
                    <h2 className="text-lg font-semibold">Title</h2>
                    <p className={`text-${tone}-600 mt-2`}>Body</p>
                </div>
            );
        }
        "#)?;

        create_test_file(dir.path(), "pages/index.astro", r#"
        ---
        import Layout from "../layouts/Layout.astro";
        ---
        <Layout title="Home">
            <main class="mx-auto max-w-5xl p-4">
                <section class:list={["grid gap-4", { hidden: empty }]}>
                </section>
            </main>
        </Layout>
        "#)?;

        create_test_file(dir.path(), "styles/button.vue", r#"
        <template><button class="btn">Go</button></template>
        <style>
        .btn { @apply px-4 py-2 rounded-lg; }
        </style>
        "#)?;

        Ok(dir)
    }

    #[test]
    fn test_scan_project_collects_classes() -> Result<()> {
        let dir = project()?;
        let processor = ClassProcessor::new(
            ClassScanOptions { string_literals: false, ..ClassScanOptions::default() },
            FilterPolicy::default(),
        );

        let result = processor.scan_directory(dir.path())?;

        assert_eq!(result.stats.total_files, 3);
        assert_eq!(result.stats.files_with_classes, 3);
        assert_eq!(
            result.classes,
            classes(&[
                "border", "btn", "font-semibold", "gap-4", "grid", "max-w-5xl", "mt-2",
                "mx-auto", "p-4", "px-4", "py-2", "rounded-lg", "text-lg",
            ])
        );

        // Shared across Card.tsx and button.vue
        assert_eq!(result.frequency["rounded-lg"], 2);
        assert_eq!(result.frequency["p-4"], 2);
        assert_eq!(result.frequency["btn"], 1);

        Ok(())
    }

    #[test]
    fn test_string_literals_widen_the_net() -> Result<()> {
        let dir = project()?;
        let processor = ClassProcessor::with_defaults();

        let result = processor.scan_directory(dir.path())?;

        // "Home" is uppercase and paths are rejected, only real classes come through
        assert!(!result.classes.contains("Home"));
        assert!(!result.classes.contains("../lib/utils"));
        assert!(!result.classes.contains("../layouts/Layout.astro"));
        assert!(result.classes.contains("rounded-lg"));
        assert!(result.stats.rejected_candidates > 0);
        assert!(result.stats.rejections_by_rule.contains_key("uppercase"));

        Ok(())
    }

    #[test]
    fn test_no_interpolated_fragment_survives() -> Result<()> {
        let dir = project()?;
        let result = ClassProcessor::with_defaults().scan_directory(dir.path())?;

        for class in &result.classes {
            assert!(!class.contains("${"), "interpolated fragment {}", class);
            assert!(!class.contains("tone"), "interpolated fragment {}", class);
        }
        assert!(!result.classes.contains("text-"));
        assert!(!result.classes.contains("-600"));
        Ok(())
    }

    #[test]
    fn test_unreadable_file_is_skipped() -> Result<()> {
        let dir = project()?;
        fs::write(dir.path().join("components/Broken.tsx"), [0x66, 0x6c, 0xff, 0x78])?;

        let result = ClassProcessor::with_defaults().scan_directory(dir.path())?;

        assert_eq!(result.stats.total_files, 4);
        assert_eq!(result.stats.error_files, 1);
        assert_eq!(result.stats.error_file_paths, vec![dir.path().join("components/Broken.tsx")]);
        assert!(result.classes.contains("mx-auto"));
        Ok(())
    }

    #[test]
    fn test_process_content_without_filesystem() {
        let processor = ClassProcessor::with_defaults();

        let found = processor.process_content(r#"<div class="flex items-center p-4">"#);

        assert_eq!(found, classes(&["flex", "items-center", "p-4"]));
    }

    #[test]
    fn test_prose_in_parentheses_is_not_a_class() {
        let processor = ClassProcessor::with_defaults();

        let found = processor.process_content(r#"const msg = "Failed (Invalid input) [Retry later]";"#);

        assert!(found.is_empty(), "unexpected classes: {:?}", found);
    }

    #[test]
    fn test_write_and_reload_safelist() -> Result<()> {
        let dir = project()?;
        let output = dir.path().join("config/tailwindWhitelist.json");

        let result = ClassProcessor::with_defaults().scan_directory(dir.path())?;
        let operations = SafelistOperations::new(&output);
        let stats = operations.write(&result)?;

        let loaded = SafelistStorage::new(&output).load()?.expect("safelist written");
        assert_eq!(stats.total_classes, loaded.safelist.len());

        let mut sorted = loaded.safelist.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(loaded.safelist, sorted);

        Ok(())
    }
}
