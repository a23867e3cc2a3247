//! Generators compiled into the binary.
//!
//! [`builtin_catalog`] is what `forge generate` and `forge list` start from
//! before project-local generators are merged in. [`project_generator`] is
//! used only by `forge new` and is not part of the catalog.
//!
//! Every file path and body may use the placeholders `name`, `project_name`,
//! `package_name`, and `script_name` in double braces.

use forge_core::domain::{EmbeddedFile, GeneratorCatalog, GeneratorDescriptor};

// ── controller ───────────────────────────────────────────────────────────────

static CONTROLLER: &[EmbeddedFile] = &[
    EmbeddedFile::new(
        "{{package_name}}/app/controllers/{{name}}.py",
        r#""""{{name}} controller."""
from fastapi import APIRouter

router = APIRouter(prefix="/{{name}}", tags=["{{name}}"])


@router.get("")
async def index():
    """List {{name}} resources."""
    return {"controller": "{{name}}"}
"#,
    ),
    EmbeddedFile::new(
        "tests/unit/app/controllers/test_{{name}}.py",
        r#"from fastapi.testclient import TestClient
from fastapi import FastAPI

from {{package_name}}.app.controllers.{{name}} import router


def test_index():
    app = FastAPI()
    app.include_router(router)
    response = TestClient(app).get("/{{name}}")
    assert response.status_code == 200
"#,
    ),
];

// ── model ────────────────────────────────────────────────────────────────────

static MODEL: &[EmbeddedFile] = &[
    EmbeddedFile::new(
        "{{package_name}}/app/models/{{name}}.py",
        r#""""{{name}} model."""
from pydantic import BaseModel


class {{name}}(BaseModel):
    """Data model for {{name}}."""

    id: int
"#,
    ),
    EmbeddedFile::new(
        "tests/unit/app/models/test_{{name}}.py",
        r#"from {{package_name}}.app.models.{{name}} import {{name}}


def test_model_accepts_id():
    assert {{name}}(id=1).id == 1
"#,
    ),
];

// ── generator ────────────────────────────────────────────────────────────────

static GENERATOR: &[EmbeddedFile] = &[
    EmbeddedFile::new(
        "lib/generators/{{name}}/generator.toml",
        r#"[generator]
name = "{{name}}"
description = "Project-local generator for {{project_name}}"
"#,
    ),
    EmbeddedFile::new(
        "lib/generators/{{name}}/README.md",
        r#"# {{name}} generator

Everything under the `template` directory next to this file is rendered into
the project root by `forge generate {{name}} <NAME>`. File names and contents
may use the placeholders name, project_name, package_name and script_name
wrapped in double braces.
"#,
    ),
    EmbeddedFile::new(
        r"lib/generators/{{name}}/template/\{{package_name}}/\{{name}}.py",
        r#""""\{{name}}, generated by the {{name}} generator."""


def \{{name}}():
    return "\{{name}} from \{{project_name}}"
"#,
    ),
];

// ── project (forge new) ──────────────────────────────────────────────────────

static PROJECT: &[EmbeddedFile] = &[
    EmbeddedFile::new(
        "forge.ini",
        "[project]\nproject_name = {{project_name}}\npackage_name = {{package_name}}\nscript_name = {{script_name}}\n",
    ),
    EmbeddedFile::new(
        "README.md",
        r#"# {{project_name}}

Generated by forge.

```shell
make install
{{script_name}} --help
forge generate controller users
```
"#,
    ),
    EmbeddedFile::new(
        "Makefile",
        ".PHONY: install test\n\ninstall:\n\tpip install -e .\n\ntest:\n\tpytest tests\n",
    ),
    EmbeddedFile::new(
        "pyproject.toml",
        r#"[project]
name = "{{project_name}}"
version = "0.1.0"
requires-python = ">=3.9"
dependencies = ["fastapi", "uvicorn", "pydantic"]

[project.scripts]
{{script_name}} = "{{package_name}}.cli:main"

[build-system]
requires = ["setuptools>=61"]
build-backend = "setuptools.build_meta"
"#,
    ),
    EmbeddedFile::new("{{package_name}}/__init__.py", ""),
    EmbeddedFile::new(
        "{{package_name}}/cli.py",
        r#""""Command line entry point for {{project_name}}."""
import argparse


def main(argv=None):
    parser = argparse.ArgumentParser(prog="{{script_name}}")
    parser.add_argument("--host", default="127.0.0.1")
    parser.add_argument("--port", type=int, default=8000)
    args = parser.parse_args(argv)

    import uvicorn

    uvicorn.run("{{package_name}}.app:app", host=args.host, port=args.port)


if __name__ == "__main__":
    main()
"#,
    ),
    EmbeddedFile::new(
        "{{package_name}}/app/__init__.py",
        "from fastapi import FastAPI\n\napp = FastAPI(title=\"{{project_name}}\")\n",
    ),
    EmbeddedFile::new("{{package_name}}/app/controllers/__init__.py", ""),
    EmbeddedFile::new("{{package_name}}/app/models/__init__.py", ""),
    EmbeddedFile::new("tests/__init__.py", ""),
    EmbeddedFile::new("lib/generators/.gitkeep", ""),
];

/// The built-in generators: `controller`, `model`, and `generator`.
pub fn builtin_catalog() -> GeneratorCatalog {
    [
        GeneratorDescriptor::builtin("controller", "Creates a new controller", CONTROLLER),
        GeneratorDescriptor::builtin("model", "Creates a new model", MODEL),
        GeneratorDescriptor::builtin(
            "generator",
            "Creates a new project-local generator",
            GENERATOR,
        ),
    ]
    .into_iter()
    .collect()
}

/// The skeleton rendered by `forge new`.
pub fn project_generator() -> GeneratorDescriptor {
    GeneratorDescriptor::builtin("project", "Creates a new forge project", PROJECT)
}
