use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CSHARP_CONFIG, CliTest, FORM1};

fn form_project() -> Result<CliTest> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;
    test.write_file(".resrefactorrc.json", CSHARP_CONFIG)?;
    Ok(test)
}

#[test]
fn test_extract_preview_leaves_file() -> Result<()> {
    let test = form_project()?;

    let mut cmd = test.extract_command();
    cmd.args(["Form1.cs", "10:30", "--name", "Test"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Test String"  C#
      --> Form1.cs:10:25
       |
    10 |             this.Text = "Test String";
       |                         ^^^^^^^^^^^^^
       = value: Test String
       = strategy: csharp
       = resource file: Resource1.resx (ResXFileCodeGenerator)
       = reference: WindowsForms1.Resource1.Test
       = replace with: Resource1.Test

    Would replace "Test String" with Resource1.Test.
    Run with --apply to rewrite the file.

    ----- stderr -----
    "#);
    assert_eq!(test.read_file("Form1.cs")?, FORM1);

    Ok(())
}

#[test]
fn test_extract_apply_rewrites_file() -> Result<()> {
    let test = form_project()?;

    let mut cmd = test.extract_command();
    cmd.args(["Form1.cs", "10:30", "--name", "Test", "--apply"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Test String"  C#
      --> Form1.cs:10:25
       |
    10 |             this.Text = "Test String";
       |                         ^^^^^^^^^^^^^
       = value: Test String
       = strategy: csharp
       = resource file: Resource1.resx (ResXFileCodeGenerator)
       = reference: WindowsForms1.Resource1.Test
       = replace with: Resource1.Test

    ✓ Replaced literal in Form1.cs
      |             this.Text = Resource1.Test;

    ----- stderr -----
    "#);

    // the comment and the other literal are untouched
    assert_eq!(
        test.read_file("Form1.cs")?,
        FORM1.replace("\"Test String\"", "Resource1.Test")
    );

    Ok(())
}

#[test]
fn test_extract_keeps_crlf() -> Result<()> {
    let test = CliTest::with_file(".resrefactorrc.json", CSHARP_CONFIG)?;
    test.write_file("Form1.cs", &FORM1.replace('\n', "\r\n"))?;

    let mut cmd = test.extract_command();
    cmd.args(["Form1.cs", "10:30", "--name", "Test", "--apply"]);
    let output = cmd.output()?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("Form1.cs")?,
        FORM1
            .replace("\"Test String\"", "Resource1.Test")
            .replace('\n', "\r\n")
    );

    Ok(())
}

#[test]
fn test_extract_resource_file_override() -> Result<()> {
    let test = form_project()?;

    let mut cmd = test.extract_command();
    cmd.args([
        "Form1.cs",
        "10:30",
        "--name",
        "Window Title",
        "--resource-file",
        "Strings/Labels.resx",
    ]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Test String"  C#
      --> Form1.cs:10:25
       |
    10 |             this.Text = "Test String";
       |                         ^^^^^^^^^^^^^
       = value: Test String
       = strategy: csharp
       = resource file: Strings/Labels.resx (ResXFileCodeGenerator)
       = reference: WindowsForms1.Strings.Labels.Window_Title
       = replace with: Strings.Labels.Window_Title

    Would replace "Test String" with Strings.Labels.Window_Title.
    Run with --apply to rewrite the file.

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_extract_vb_project() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".resrefactorrc.json",
        r#"{
  "project": { "kind": "visualBasic", "rootNamespace": "VbApp" },
  "resourceFile": { "path": "My Project/Resources.resx" }
}"#,
    )?;
    test.write_file(
        "Module1.vb",
        "Module Module1\n    Sub Main()\n        Console.WriteLine(\"Hello\")\n    End Sub\nEnd Module\n",
    )?;

    let mut cmd = test.extract_command();
    cmd.args(["Module1.vb", "3:28", "--name", "Greeting", "--apply"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Hello"  VB
      --> Module1.vb:3:27
      |
    3 |         Console.WriteLine("Hello")
      |                           ^^^^^^^
      = value: Hello
      = strategy: vb
      = resource file: My Project/Resources.resx (ResXFileCodeGenerator)
      = reference: My.Resources.Greeting
      = replace with: My.Resources.Greeting

    ✓ Replaced literal in Module1.vb
      |         Console.WriteLine(My.Resources.Greeting)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_extract_xaml_declares_namespace() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".resrefactorrc.json",
        r#"{
  "project": { "defaultNamespace": "WpfApp" },
  "resourceFile": { "path": "Properties/Resources.resx" }
}"#,
    )?;
    test.write_file(
        "MainWindow.xaml",
        "<Window x:Class=\"WpfApp.MainWindow\"\n        xmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\">\n    <Button Content=\"Click me\"/>\n</Window>\n",
    )?;

    let mut cmd = test.extract_command();
    cmd.args(["MainWindow.xaml", "3:23", "--name", "ClickMe", "--apply"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Click me"  XAML
      --> MainWindow.xaml:3:21
      |
    3 |     <Button Content="Click me"/>
      |                     ^^^^^^^^^^
      = value: Click me
      = strategy: xaml
      = resource file: Properties/Resources.resx (ResXFileCodeGenerator)
      = reference: WpfApp.Properties:Resources.ClickMe
      = replace with: "{x:Static WpfApp.Properties:Resources.ClickMe}"
      = declare: xmlns:WpfApp.Properties="clr-namespace:WpfApp.Properties" at MainWindow.xaml:2:74

    ✓ Replaced literal in MainWindow.xaml
      |     <Button Content="{x:Static WpfApp.Properties:Resources.ClickMe}"/>

    ----- stderr -----
    "#);

    assert_eq!(
        test.read_file("MainWindow.xaml")?,
        "<Window x:Class=\"WpfApp.MainWindow\"\n        xmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\" xmlns:WpfApp.Properties=\"clr-namespace:WpfApp.Properties\">\n    <Button Content=\"{x:Static WpfApp.Properties:Resources.ClickMe}\"/>\n</Window>\n"
    );

    Ok(())
}

#[test]
fn test_extract_not_a_literal() -> Result<()> {
    let test = form_project()?;

    let mut cmd = test.extract_command();
    cmd.args(["Form1.cs", "9:20", "--name", "Test", "--apply"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ No string literal at Form1.cs:9:20

    ----- stderr -----
    ");
    assert_eq!(test.read_file("Form1.cs")?, FORM1);

    Ok(())
}

#[test]
fn test_extract_blank_name() -> Result<()> {
    let test = form_project()?;

    let mut cmd = test.extract_command();
    cmd.args(["Form1.cs", "10:30", "--name", " "]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Cannot extract from Form1.cs: invalid resource name: ` `
    ");

    Ok(())
}

#[test]
fn test_extract_unsupported_project() -> Result<()> {
    let test = form_project()?;
    test.write_file("Module1.vb", "Dim s = \"Hello\"\n")?;

    let mut cmd = test.extract_command();
    cmd.args(["Module1.vb", "1:11", "--name", "Greeting"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Cannot extract from Module1.vb: no resource strategy supports Module1.vb
    ");

    Ok(())
}
