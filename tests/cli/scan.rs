use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, FORM1};

#[test]
fn test_scan_reports_literals() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    // the literal inside the comment on line 9 is not reported
    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Test String"  C#
      --> Form1.cs:10:25
       |
    10 |             this.Text = "Test String";
       |                         ^^^^^^^^^^^^^

    literal: "Form1"  C#
      --> Form1.cs:11:25
       |
    11 |             this.Name = "Form1";
       |                         ^^^^^^^

    ✘ 2 hard-coded strings in 1 file (1 scanned)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_every_language() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Module1.vb", "' \"skip\"\nDim s = \"Hello from VB\"\n")?;
    test.write_file(
        "MainWindow.xaml",
        "<Window xmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\">\n    <Button Content=\"Click me\"/>\n</Window>\n",
    )?;
    test.write_file("Views/Home/Index.cshtml", "<h1>Welcome home</h1>\n")?;
    test.write_file("Default.aspx", "<p>Web forms text</p>\n")?;

    let mut cmd = test.scan_command();
    cmd.arg("--json");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "filePath": "Default.aspx",
        "line": 1,
        "col": 4,
        "sourceLine": "<p>Web forms text</p>",
        "variant": "aspx",
        "raw": "Web forms text",
        "value": "Web forms text"
      },
      {
        "filePath": "MainWindow.xaml",
        "line": 2,
        "col": 21,
        "sourceLine": "    <Button Content=\"Click me\"/>",
        "variant": "xaml",
        "raw": "\"Click me\"",
        "value": "Click me"
      },
      {
        "filePath": "Module1.vb",
        "line": 2,
        "col": 9,
        "sourceLine": "Dim s = \"Hello from VB\"",
        "variant": "visualbasic",
        "raw": "\"Hello from VB\"",
        "value": "Hello from VB"
      },
      {
        "filePath": "Views/Home/Index.cshtml",
        "line": 1,
        "col": 5,
        "sourceLine": "<h1>Welcome home</h1>",
        "variant": "csharprazor",
        "raw": "Welcome home",
        "value": "Welcome home"
      }
    ]

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_skips_generated_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Form1.Designer.cs", "var s = \"designer\";\n")?;
    test.write_file("obj/Debug/App.g.cs", "var s = \"generated\";\n")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✓ Scanned 0 files - no hard-coded strings found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_min_length_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".resrefactorrc.json", r#"{ "minLength": 4 }"#)?;
    test.write_file("A.cs", "var a = \"ok\";\nvar b = \"long enough\";\n")?;

    let mut cmd = test.scan_command();
    cmd.arg("--json");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "filePath": "A.cs",
        "line": 2,
        "col": 9,
        "sourceLine": "var b = \"long enough\";",
        "variant": "csharp",
        "raw": "\"long enough\"",
        "value": "long enough"
      }
    ]

    ----- stderr -----
    "#);

    let mut cmd = test.scan_command();
    cmd.args(["--min-length", "1"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "ok"  C#
      --> A.cs:1:9
      |
    1 | var a = "ok";
      |         ^^^^

    literal: "long enough"  C#
      --> A.cs:2:9
      |
    2 | var b = "long enough";
      |         ^^^^^^^^^^^^^

    ✘ 2 hard-coded strings in 1 file (1 scanned)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".resrefactorrc.json", r#"{ "ignores": ["[bad"] }"#)?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid glob pattern in 'ignores': "[bad": Pattern syntax error near position 0: invalid range pattern
    "#);

    Ok(())
}
