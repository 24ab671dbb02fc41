#![deny(missing_docs)]

//! # Templates
//!
//! Default [`Scaffolder`]: renders the module, routing module and companion
//! component files and writes them through the file store. Existing files are
//! never overwritten.

use crate::codegen::import_statement;
use crate::collaborators::{CompanionOptions, ModuleTemplate, Scaffolder};
use crate::error::{AppError, AppResult};
use crate::naming::{classify, dasherize};
use crate::options::RoutingScope;
use crate::parser::parse_source;
use crate::paths;
use crate::patcher::{begin_update, commit_update, import_insertion, ng_module_symbol, FileStore};

/// Renders the built-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateScaffolder;

impl Scaffolder for TemplateScaffolder {
    fn apply_template(&self, store: &mut dyn FileStore, template: &ModuleTemplate) -> AppResult<Vec<String>> {
        let stem = dasherize(&template.name);
        let mut files = vec![(
            paths::join(&template.directory, &format!("{}.module.ts", stem)),
            render_module(template),
        )];

        if template.routing_file {
            files.push((
                paths::join(&template.directory, &format!("{}-routing.module.ts", stem)),
                render_routing_module(template),
            ));
        }

        write_new_files(store, files)
    }

    fn generate_companion(&self, store: &mut dyn FileStore, options: &CompanionOptions) -> AppResult<Vec<String>> {
        let stem = dasherize(&options.name);
        let directory = if options.flat {
            paths::normalize(&options.path)
        } else {
            paths::join(&options.path, &stem)
        };

        let component_file = paths::join(&directory, &format!("{}.component.ts", stem));
        let files = vec![
            (component_file.clone(), render_component(options)),
            (
                paths::join(&directory, &format!("{}.component.html", stem)),
                format!("<p>{} works!</p>\n", stem),
            ),
            (paths::join(&directory, &format!("{}.component.css", stem)), String::new()),
        ];
        let created = write_new_files(store, files)?;

        if let (false, Some(module)) = (options.skip_import, &options.module) {
            let module_path = paths::join(&options.path, module);
            declare_component(store, &module_path, &component_file, &options.name)?;
        }

        Ok(created)
    }
}

fn write_new_files(store: &mut dyn FileStore, files: Vec<(String, String)>) -> AppResult<Vec<String>> {
    if let Some((existing, _)) = files.iter().find(|(path, _)| store.exists(path)) {
        return Err(AppError::FileExists(existing.clone()));
    }

    let mut created = Vec::with_capacity(files.len());
    for (path, content) in files {
        store.write(&path, &content)?;
        created.push(path);
    }
    Ok(created)
}

/// Imports the component into `module_path` and lists it in `declarations`.
fn declare_component(
    store: &mut dyn FileStore,
    module_path: &str,
    component_file: &str,
    name: &str,
) -> AppResult<()> {
    let symbol = format!("{}Component", classify(name));
    let specifier = paths::build_relative_path(module_path, component_file.trim_end_matches(".ts"));

    let mut recorder = begin_update(&*store, module_path)?;
    let tree = parse_source(recorder.original())?;

    let import_edit = import_insertion(&tree, &import_statement(&symbol, &specifier));
    let declaration = ng_module_symbol(&tree, "declarations", &symbol);

    recorder.push(import_edit);
    match declaration {
        Some(edit) => {
            recorder.push(edit);
        }
        None => tracing::warn!(module = module_path, "no @NgModule declarations to register the component in"),
    }

    commit_update(store, &recorder)
}

fn render_module(t: &ModuleTemplate) -> String {
    let class = classify(&t.name);
    let stem = dasherize(&t.name);
    let inline_routes = t.lazy_route && !t.lazy_route_with_routing_module;

    let mut out = String::new();
    out.push_str("import { NgModule } from '@angular/core';\n");
    out.push_str("import { CommonModule } from '@angular/common';\n");
    if inline_routes {
        out.push_str("import { Routes, RouterModule } from '@angular/router';\n");
    }
    if t.routing_file {
        out.push_str(&format!(
            "import {{ {}RoutingModule }} from './{}-routing.module';\n",
            class, stem
        ));
    }
    if t.lazy_route {
        out.push_str(&format!(
            "import {{ {}Component }} from './{}.component';\n",
            class, stem
        ));
    }
    out.push('\n');

    if inline_routes {
        out.push_str("const routes: Routes = [\n");
        out.push_str(&format!("  {{ path: '', component: {}Component }}\n", class));
        out.push_str("];\n\n");
    }

    let declarations = if t.lazy_route {
        format!("{}Component", class)
    } else {
        String::new()
    };

    let mut imports = vec!["CommonModule".to_string()];
    if t.routing_file {
        imports.push(format!("{}RoutingModule", class));
    }
    if inline_routes {
        imports.push("RouterModule.forChild(routes)".to_string());
    }

    out.push_str("@NgModule({\n");
    out.push_str(&format!("  declarations: [{}],\n", declarations));
    out.push_str("  imports: [\n");
    out.push_str(&format!("    {}\n", imports.join(",\n    ")));
    out.push_str("  ]\n");
    out.push_str("})\n");
    out.push_str(&format!("export class {}Module {{ }}\n", class));
    out
}

fn render_routing_module(t: &ModuleTemplate) -> String {
    let class = classify(&t.name);
    let stem = dasherize(&t.name);
    let scope = match t.routing_scope {
        RoutingScope::Root => "forRoot",
        RoutingScope::Child => "forChild",
    };

    let mut out = String::new();
    out.push_str("import { NgModule } from '@angular/core';\n");
    out.push_str("import { Routes, RouterModule } from '@angular/router';\n");
    if t.lazy_route {
        out.push_str(&format!(
            "import {{ {}Component }} from './{}.component';\n",
            class, stem
        ));
    }
    out.push('\n');

    if t.lazy_route {
        out.push_str(&format!(
            "const routes: Routes = [{{ path: '', component: {}Component }}];\n\n",
            class
        ));
    } else {
        out.push_str("const routes: Routes = [];\n\n");
    }

    out.push_str("@NgModule({\n");
    out.push_str(&format!("  imports: [RouterModule.{}(routes)],\n", scope));
    out.push_str("  exports: [RouterModule]\n");
    out.push_str("})\n");
    out.push_str(&format!("export class {}RoutingModule {{ }}\n", class));
    out
}

fn render_component(options: &CompanionOptions) -> String {
    let class = classify(&options.name);
    let stem = dasherize(&options.name);

    format!(
        "import {{ Component, OnInit }} from '@angular/core';

@Component({{
  selector: '{prefix}-{stem}',
  templateUrl: './{stem}.component.html',
  styleUrls: ['./{stem}.component.css']
}})
export class {class}Component implements OnInit {{

  constructor() {{ }}

  ngOnInit(): void {{
  }}

}}
",
        prefix = options.prefix,
        stem = stem,
        class = class
    )
}
