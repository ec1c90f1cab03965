use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, FORM1};

#[test]
fn test_imports_in_csharp() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.imports_command();
    cmd.args(["Form1.cs", "10:30"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Imports in scope at Form1.cs:10:30
      WindowsForms1  WindowsForms1
      System         using System;

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_imports_from_view_imports() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Views/_ViewImports.cshtml", "@using WebApp.Models\n")?;
    test.write_file("Views/Home/Index.cshtml", "<h1>Welcome home</h1>\n")?;

    let mut cmd = test.imports_command();
    cmd.args(["Views/Home/Index.cshtml", "1:6"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Imports in scope at Views/Home/Index.cshtml:1:6
      WebApp.Models  @using WebApp.Models

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_no_imports() -> Result<()> {
    let test = CliTest::with_file("Default.aspx", "<p>Hello</p>\n")?;

    let mut cmd = test.imports_command();
    cmd.args(["Default.aspx", "1:5"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ No imports in scope at Default.aspx:1:5

    ----- stderr -----
    ");

    Ok(())
}
