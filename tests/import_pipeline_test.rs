use menu_etl::adapters::docx::{menu_from_docx, menu_to_docx};
use menu_etl::core::pipeline::REPORT_FILE;
use menu_etl::domain::model::OutputFormat;
use menu_etl::utils::validation::Validate;
use menu_etl::{parse_menu, EtlEngine, ImportSettings, LocalStorage, Menu, MenuImportPipeline};
use tempfile::TempDir;

const DINNER_MENU: &str = "Jantar Italiano\nENTRADAS:\nBRUSCHETTA\nPão italiano com tomate\nPRATOS PRINCIPAIS:\nRISOTO\nRisoto de cogumelos\nBebidas:\nVinho tinto\nÁgua\nPreço por pessoa\nR$ 120,00\nR$ 180,00";

const LUNCH_MENU: &str = "Almoço Executivo\nSALADAS:\nCAPRESE\nTomate e muçarela de búfala\nBebidas:\nSuco de laranja\nPreço por pessoa\nR$ 60,00\nR$ 75,50";

#[tokio::test]
async fn test_import_text_and_docx_menus_end_to_end() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path();

    std::fs::write(base.join("jantar.txt"), DINNER_MENU)?;
    std::fs::write(base.join("almoco.docx"), menu_to_docx(&parse_menu(LUNCH_MENU)?)?)?;
    std::fs::write(base.join("rascunho.txt"), "Rascunho\nENTRADAS:\nSALADA\nFolhas")?;

    let settings = ImportSettings {
        input_files: vec![
            "jantar.txt".to_string(),
            "almoco.docx".to_string(),
            "rascunho.txt".to_string(),
        ],
        output_path: "out".to_string(),
        output_formats: vec![OutputFormat::Json, OutputFormat::Txt, OutputFormat::Docx],
    };
    settings.validate()?;

    let pipeline = MenuImportPipeline::new(LocalStorage::new(base), settings);
    let engine = EtlEngine::new(pipeline);
    let output_path = engine.run().await?;
    assert_eq!(output_path, "out");

    let out = base.join("out");
    for stem in ["jantar", "almoco"] {
        for ext in ["json", "txt", "docx"] {
            assert!(out.join(format!("{}.{}", stem, ext)).exists(), "{}.{}", stem, ext);
        }
    }
    assert!(!out.join("rascunho.json").exists());

    let dinner: Menu = serde_json::from_slice(&std::fs::read(out.join("jantar.json"))?)?;
    assert_eq!(dinner, parse_menu(DINNER_MENU)?);

    let lunch_text = std::fs::read_to_string(out.join("almoco.txt"))?;
    assert_eq!(parse_menu(&lunch_text)?, parse_menu(LUNCH_MENU)?);

    let lunch_docx = menu_from_docx(&std::fs::read(out.join("almoco.docx"))?)?;
    assert_eq!(lunch_docx.title(), "Almoço Executivo");

    let report: serde_json::Value =
        serde_json::from_slice(&std::fs::read(out.join(REPORT_FILE))?)?;
    let imported = report["imported"].as_array().unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0]["source"], "jantar.txt");
    assert_eq!(imported[0]["sections"], 3);
    assert_eq!(imported[0]["items"], 4);

    let failures = report["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["source"], "rascunho.txt");
    assert_eq!(failures[0]["kind"], "MissingPriceBlock");

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_fails_the_run() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let settings = ImportSettings {
        input_files: vec!["nao-existe.docx".to_string()],
        output_path: "out".to_string(),
        output_formats: vec![OutputFormat::Json],
    };

    let pipeline = MenuImportPipeline::new(LocalStorage::new(temp_dir.path()), settings);
    let result = EtlEngine::new(pipeline).run().await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("out").exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_docx_is_reported_as_error() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("quebrado.docx"), b"not a zip archive")?;

    let settings = ImportSettings {
        input_files: vec!["quebrado.docx".to_string()],
        output_path: "out".to_string(),
        output_formats: vec![OutputFormat::Json],
    };

    let pipeline = MenuImportPipeline::new(LocalStorage::new(temp_dir.path()), settings);
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, menu_etl::EtlError::ZipError(_)));
    Ok(())
}
