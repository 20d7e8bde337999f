//! Snapshot tests for whole-script rendering.
//!
//! Each test builds one script and checks the source code every target
//! produces for it. Run `cargo insta review` to update snapshots after
//! intentional changes.

use crossemit::{
    AcceptsStatements, ArgSpec, ClassProperty, ClassSpec, CrossType, DictBuilderStatement,
    EmitError, ExceptionClasses, FunctionSpec, InterfaceSpec, PanExpr, RenderOptions, Script,
    Target, Writer, await_, call, dictof, exacteq_, greaterthan, listof, lit, maybe, pan, panlist,
};

fn render(script: &Script, target: Target) -> String {
    script
        .get_source_code(target, &RenderOptions::default())
        .expect("render failed")
}

fn render_err(script: &Script, target: Target) -> EmitError {
    script
        .get_source_code(target, &RenderOptions::default())
        .expect_err("render should fail")
}

// ============================================================================
// Classes
// ============================================================================

mod classes {
    use super::*;

    fn class1() -> Script {
        let mut script = Script::new();
        let class = script.also(ClassSpec::new("Class1"));
        class
            .add_property(ClassProperty::new("name", CrossType::Str).initarg())
            .unwrap();
        class
            .add_property(ClassProperty::new("count", CrossType::Num).default(0))
            .unwrap();
        script
    }

    #[test]
    fn initargs_python() {
        insta::assert_snapshot!(render(&class1(), Target::Python), @r"
        class Class1:
            name: str
            count: int

            def __init__(
                self,
                name: str,
            ) -> None:
                self.name = name
                self.count = 0
        ");
    }

    #[test]
    fn initargs_typescript() {
        insta::assert_snapshot!(render(&class1(), Target::TypeScript), @r"
        class Class1 {
            public name: string;
            public count: number = 0;

            public constructor(
                name: string,
            ) {
                this.name = name;
            }
        }
        ");
    }

    #[test]
    fn initargs_php() {
        insta::assert_snapshot!(render(&class1(), Target::Php), @r"
        <?php

        class Class1 {
            /** @var string */
            public $name;
            /** @var int */
            public $count = 0;

            public function __construct(
                string $name
            ) {
                $this->name = $name;
            }
        }
        ");
    }

    fn class2() -> Script {
        let mut script = Script::new();
        let class = script.also(ClassSpec::new("Class2"));
        class
            .set_abstract(true)
            .set_ts_export(true)
            .set_docstring(["Base of all shapes."]);
        class.create_method("area", CrossType::Num).set_abstract(true);
        class
            .create_method("describe", CrossType::Str)
            .also_return(pan("shape"));
        script
    }

    #[test]
    fn abstract_python() {
        insta::assert_snapshot!(render(&class2(), Target::Python), @r#"
        import abc

        class Class2(abc.ABC):
            """
            Base of all shapes.
            """

            @abc.abstractmethod
            def area(
                self,
            ) -> int:
                ...

            def describe(
                self,
            ) -> str:
                return 'shape'
        "#);
    }

    #[test]
    fn abstract_typescript() {
        insta::assert_snapshot!(render(&class2(), Target::TypeScript), @r"
        /**
         * Base of all shapes.
         */
        export abstract class Class2 {
            abstract area(
            ): number;

            public describe(
            ): string {
                return 'shape';
            }
        }
        ");
    }

    #[test]
    fn abstract_php() {
        insta::assert_snapshot!(render(&class2(), Target::Php), @r"
        <?php

        /**
         * Base of all shapes.
         */
        abstract class Class2 {
            abstract public function area(
            ): int;

            public function describe(
            ): string {
                return 'shape';
            }
        }
        ");
    }

    #[test]
    fn abstract_method_with_body_is_rejected() {
        let mut script = Script::new();
        let class = script.also(ClassSpec::new("Broken"));
        let method = class.create_method("run", CrossType::Num);
        method.set_abstract(true);
        method.also_return(pan(1));
        for target in Target::ALL {
            assert!(matches!(
                render_err(&script, target),
                EmitError::InvalidLogic(_)
            ));
        }
    }

    fn number_box() -> Script {
        let mut script = Script::new();
        let class = script.also(ClassSpec::new("NumberBox"));
        class.set_dataclass(true);
        let value = class
            .add_property(ClassProperty::new("value", CrossType::Num).initarg())
            .unwrap();
        class
            .add_property(ClassProperty::new("label", CrossType::Str).default("box"))
            .unwrap();
        class
            .create_method("doubled", CrossType::Num)
            .also_return(call("double", vec![value]));
        script
    }

    #[test]
    fn dataclass_python() {
        insta::assert_snapshot!(render(&number_box(), Target::Python), @r"
        from dataclasses import dataclass

        @dataclass
        class NumberBox:
            value: int
            label: str

            def __init__(
                self,
                value: int,
            ) -> None:
                self.value = value
                self.label = 'box'

            def doubled(
                self,
            ) -> int:
                return double(self.value)
        ");
    }

    #[test]
    fn dataclass_defaults_are_assigned_in_constructor() {
        let mut script = Script::new();
        let class = script.also(ClassSpec::new("Box"));
        class.set_dataclass(true);
        class
            .add_property(
                ClassProperty::new("tags", listof(CrossType::Str))
                    .default(panlist([], CrossType::Str)),
            )
            .unwrap();
        class
            .add_property(ClassProperty::new("value", CrossType::Num).initarg())
            .unwrap();
        class
            .add_property(ClassProperty::new("count", CrossType::Num))
            .unwrap();
        insta::assert_snapshot!(render(&script, Target::Python), @r"
        from dataclasses import dataclass
        from typing import List

        @dataclass
        class Box:
            tags: List[str]
            value: int
            count: int

            def __init__(
                self,
                value: int,
            ) -> None:
                self.value = value
                self.tags = []
        ");
    }

    #[test]
    fn dataclass_typescript() {
        insta::assert_snapshot!(render(&number_box(), Target::TypeScript), @r"
        class NumberBox {
            public value: number;
            public label: string = 'box';

            public constructor(
                value: number,
            ) {
                this.value = value;
            }

            public doubled(
            ): number {
                return double(this.value);
            }
        }
        ");
    }

    fn pet() -> Script {
        let mut script = Script::new();
        let class = script.also(ClassSpec::new("Pet"));
        class.add_python_base("Animal", true).unwrap();
        class.set_typescript_parent("Animal").unwrap();
        class.set_php_parent("Animal").unwrap();
        class
            .add_property(ClassProperty::new("owner", maybe(CrossType::Str)).initarg())
            .unwrap();
        class
            .add_property(
                ClassProperty::new("tricks", listof(CrossType::Str))
                    .default(panlist([], CrossType::Str)),
            )
            .unwrap();
        script
    }

    #[test]
    fn inheritance_python() {
        insta::assert_snapshot!(render(&pet(), Target::Python), @r"
        from typing import Any, List, Optional

        class Pet(Animal):
            owner: Optional[str]
            tricks: List[str]

            def __init__(
                self,
                owner: Optional[str],
                *args: Any,
                **kwargs: Any,
            ) -> None:
                self.owner = owner
                super().__init__(*args, **kwargs)
                self.tricks = []
        ");
    }

    #[test]
    fn inheritance_typescript() {
        insta::assert_snapshot!(render(&pet(), Target::TypeScript), @r"
        class Pet extends Animal {
            public owner: string | null;
            public tricks: string[];

            public constructor(
                owner: string | null,
            ) {
                super();
                this.owner = owner;
                this.tricks = [];
            }
        }
        ");
    }

    #[test]
    fn inheritance_php() {
        insta::assert_snapshot!(render(&pet(), Target::Php), @r"
        <?php

        class Pet extends Animal {
            /** @var null|string */
            public $owner;
            /** @var string[] */
            public $tricks;

            public function __construct(
                $owner
            ) {
                $this->owner = $owner;
                parent::__construct();
                $this->tricks = [];
            }
        }
        ");
    }
}

// ============================================================================
// Functions
// ============================================================================

mod functions {
    use super::*;

    fn overloaded() -> Script {
        let mut script = Script::new();
        let func = script.also(FunctionSpec::new("get_item", maybe(CrossType::Str)));
        let key = func.add_positional_arg(("key", CrossType::Str)).unwrap();
        let default = func
            .add_positional_arg(
                ArgSpec::new("default", CrossType::Str)
                    .nullable()
                    .default(PanExpr::Null),
            )
            .unwrap();
        func.add_overload([("default", Some(CrossType::Str))], CrossType::Str)
            .unwrap();
        func.also_return(call("lookup", vec![key, default]));
        script
    }

    #[test]
    fn overloads_python() {
        insta::assert_snapshot!(render(&overloaded(), Target::Python), @r"
        import typing

        from typing import Optional


        @typing.overload
        def get_item(
            key: str,
            default: str,
        ) -> str:
            ...

        def get_item(
            key: str,
            default: Optional[str] = None,
        ) -> Optional[str]:
            return lookup(key, default)
        ");
    }

    #[test]
    fn overloads_are_python_only() {
        let script = overloaded();
        for target in [Target::TypeScript, Target::Php] {
            assert!(matches!(
                render_err(&script, target),
                EmitError::NotSupported { .. }
            ));
        }
    }

    #[test]
    fn arguments_after_overloads_are_rejected() {
        let mut func = FunctionSpec::new("f", CrossType::Num);
        func.add_positional_arg(("a", CrossType::Num)).unwrap();
        func.add_overload([("a", None)], CrossType::Num).unwrap();
        assert!(matches!(
            func.add_positional_arg(("b", CrossType::Num)),
            Err(EmitError::InvalidLogic(_))
        ));
    }

    fn dict_builder() -> Script {
        let mut script = Script::new();
        let func = script.also(FunctionSpec::new(
            "make_params",
            dictof(CrossType::Str, CrossType::Any),
        ));
        let query = func.add_positional_arg(("query", CrossType::Str)).unwrap();
        let page = func
            .add_positional_arg(ArgSpec::new("page", CrossType::Num).omittable())
            .unwrap();
        let builder = func.also(
            DictBuilderStatement::new("params", CrossType::Str, CrossType::Any).unwrap(),
        );
        builder.add_pair("q", query, false).add_pair("page", page, true);
        let params = builder.var();
        func.also_return(params);
        script
    }

    #[test]
    fn omittable_args_python() {
        insta::assert_snapshot!(render(&dict_builder(), Target::Python), @r"
        import builtins

        from typing import Any, Dict, Union


        def make_params(
            query: str,
            page: 'Union[int, builtins.ellipsis]' = ...,
        ) -> Dict[str, Any]:
            params: Dict[str, Any] = {'q': query}
            if not isinstance(page, type(...)):
                params['page'] = page
            return params
        ");
    }

    #[test]
    fn omittable_args_typescript() {
        insta::assert_snapshot!(render(&dict_builder(), Target::TypeScript), @r"
        function make_params(
            query: string,
            page: number | undefined = undefined,
        ): {[k: string]: any} {
            let params: {[k: string]: any} = {'q': query};
            if (typeof page !== 'undefined') {
                params['page'] = page;
            }
            return params;
        }
        ");
    }

    #[test]
    fn omittable_args_are_not_php() {
        assert!(matches!(
            render_err(&dict_builder(), Target::Php),
            EmitError::NotSupported { .. }
        ));
    }

    fn async_loader() -> Script {
        let mut script = Script::new();
        let func = script.also(FunctionSpec::new("load", CrossType::Str));
        func.set_async(true);
        let url = func.add_positional_arg(("url", CrossType::Str)).unwrap();
        func.also_return(await_(call("fetchText", vec![url])));
        script
    }

    #[test]
    fn async_python() {
        insta::assert_snapshot!(render(&async_loader(), Target::Python), @r"
        async def load(
            url: str,
        ) -> str:
            return await fetchText(url)
        ");
    }

    #[test]
    fn async_typescript() {
        insta::assert_snapshot!(render(&async_loader(), Target::TypeScript), @r"
        async function load(
            url: string,
        ): Promise<string> {
            return await fetchText(url);
        }
        ");
    }

    #[test]
    fn async_is_not_php() {
        assert!(matches!(
            render_err(&async_loader(), Target::Php),
            EmitError::NotSupported { .. }
        ));
    }
}

// ============================================================================
// Control flow
// ============================================================================

mod control_flow {
    use super::*;

    fn loop_with_conditional() -> Script {
        let mut script = Script::new();
        let items = script.also_declare(
            "items",
            listof(CrossType::Num),
            panlist([pan(1), pan(2)], CrossType::Num),
        );
        let total = script.also_declare("total", CrossType::Num, pan(0));
        script.with_for("item", items, |body| {
            let item = body.var();
            body.with_cond(greaterthan(item.clone(), pan(1)), |cond| {
                cond.also_assign(total, item.clone()).unwrap();
                cond.with_elseif(exacteq_(item, pan(0)), |alt| {
                    alt.also_raise("zero");
                });
                cond.with_else(|alt| alt.remark("small")).unwrap();
            });
        });
        script
    }

    #[test]
    fn conditional_python() {
        insta::assert_snapshot!(render(&loop_with_conditional(), Target::Python), @r"
        from typing import List

        items: List[int] = [1, 2]
        total: int = 0
        for item in items:
            if item > 1:
                total = item
            elif item == 0:
                raise Exception('zero')
            else:
                # small
                pass
        ");
    }

    #[test]
    fn conditional_typescript() {
        insta::assert_snapshot!(render(&loop_with_conditional(), Target::TypeScript), @r"
        let items: number[] = [1, 2];
        let total: number = 0;
        for (let item of items) {
            if (item > 1) {
                total = item;
            } else if (item === 0) {
                throw new Error('zero');
            } else {
                // small
            }

        }
        ");
    }

    #[test]
    fn conditional_php() {
        insta::assert_snapshot!(render(&loop_with_conditional(), Target::Php), @r"
        <?php

        /** @var int[] */
        $items = [1, 2];
        /** @var int */
        $total = 0;
        foreach ($items as $item) {
            if ($item > 1) {
                $total = $item;
            } elseif ($item === 0) {
                throw new \Exception('zero');
            } else {
                // small
            }

        }
        ");
    }

    fn try_catch() -> Script {
        let mut script = Script::new();
        script.with_try(|block| {
            block.also(call("risky", vec![]));
            block.with_catch(
                Some("e"),
                ExceptionClasses::all("KeyError").php("\\OutOfBoundsException"),
                |arm| {
                    let e = arm.var().unwrap();
                    arm.also(call("recover", vec![e]));
                },
            );
            block.with_catch(Some("e"), ExceptionClasses::any(), |arm| {
                arm.also_raise("failed");
            });
            block
                .with_finally(|cleanup| {
                    cleanup.also(call("cleanup", vec![]));
                })
                .unwrap();
        });
        script
    }

    #[test]
    fn try_catch_python() {
        insta::assert_snapshot!(render(&try_catch(), Target::Python), @r"
        try:
            risky()
        except KeyError as e:
            recover(e)
        except Exception as e:
            raise Exception('failed')
        finally:
            cleanup()
        ");
    }

    #[test]
    fn try_catch_typescript() {
        insta::assert_snapshot!(render(&try_catch(), Target::TypeScript), @r"
        try {
            risky();
        } catch (e) {
            if (e instanceof KeyError) {
                recover(e);
            } else {
                throw new Error('failed');
            }
        } finally {
            cleanup();
        }
        ");
    }

    #[test]
    fn try_catch_php() {
        insta::assert_snapshot!(render(&try_catch(), Target::Php), @r"
        <?php

        try {
            risky();
        } catch (\OutOfBoundsException $e) {
            recover($e);
        } catch (\Exception $e) {
            throw new \Exception('failed');
        } finally {
            cleanup();
        }
        ");
    }

    #[test]
    fn try_without_handlers_is_rejected() {
        let mut script = Script::new();
        script.with_try(|block| {
            block.also(call("risky", vec![]));
        });
        for target in Target::ALL {
            assert!(matches!(
                render_err(&script, target),
                EmitError::InvalidLogic(_)
            ));
        }
    }
}

// ============================================================================
// Interfaces
// ============================================================================

mod interfaces {
    use super::*;

    fn point() -> Script {
        let mut script = Script::new();
        script
            .also(InterfaceSpec::new("Point", true))
            .add_property("x", CrossType::Num)
            .unwrap()
            .add_property("label", maybe(CrossType::Str))
            .unwrap();
        script
    }

    #[test]
    fn interface_typescript() {
        insta::assert_snapshot!(render(&point(), Target::TypeScript), @r"
        export interface Point {
            x: number;
            label: string | null;
        }
        ");
    }

    #[test]
    fn interface_elsewhere_is_rejected() {
        let script = point();
        for target in [Target::Python, Target::Php] {
            assert!(matches!(
                render_err(&script, target),
                EmitError::NotSupported { .. }
            ));
        }
    }
}

// ============================================================================
// Script preamble and output destinations
// ============================================================================

mod script {
    use super::*;

    fn with_preamble() -> Script {
        let mut script = Script::new();
        script.add_file_comment("Generated file, do not edit.");
        let user_id = script.add_new_type("UserID", CrossType::Num, true).unwrap();
        let tag = script.add_new_type("Tag", lit(["a", "b"]), false).unwrap();
        script.also_import_py("os", &[]);
        script.also_import_ts("./models", &["Model"]);
        script.also_import_php("App\\Models\\Model", None);
        script.also_declare("owner", user_id, pan(5));
        script.also_declare("kind", tag, pan("a"));
        script
    }

    #[test]
    fn preamble_python() {
        insta::assert_snapshot!(render(&with_preamble(), Target::Python), @r#"
        """
        Generated file, do not edit.
        """
        import os

        from typing import Literal, NewType

        UserID = NewType('UserID', int)
        Tag = NewType('Tag', Literal['a', 'b'])

        owner: UserID = 5
        kind: Tag = 'a'
        "#);
    }

    #[test]
    fn preamble_typescript() {
        insta::assert_snapshot!(render(&with_preamble(), Target::TypeScript), @r"
        // Generated file, do not edit.
        import {Model} from './models';

        export type UserID = number & {readonly brand: unique symbol};
        type Tag = ('a' | 'b') & {readonly brand: unique symbol};

        let owner: UserID = 5;
        let kind: Tag = 'a';
        ");
    }

    #[test]
    fn preamble_php() {
        let options = RenderOptions::default().with_php_namespace("App");
        let code = with_preamble()
            .get_source_code(Target::Php, &options)
            .unwrap();
        insta::assert_snapshot!(code, @r"
        <?php

        // Generated file, do not edit.

        namespace App;

        use App\Models\Model;

        /** @var int */
        $owner = 5;
        /** @var string */
        $kind = 'a';
        ");
    }

    #[test]
    fn custom_indent() {
        let options = RenderOptions::default().with_indent("  ");
        let code = control_flow_script().get_source_code(Target::TypeScript, &options).unwrap();
        insta::assert_snapshot!(code, @r"
        for (let n of [1]) {
          n;
        }
        ");
    }

    fn control_flow_script() -> Script {
        let mut script = Script::new();
        script.with_for("n", panlist([pan(1)], CrossType::Num), |body| {
            let n = body.var();
            body.also(n);
        });
        script
    }

    #[test]
    fn rendering_is_repeatable() {
        let script = with_preamble();
        for target in Target::ALL {
            let options = RenderOptions::default().with_php_namespace("App");
            let first = script.get_source_code(target, &options).unwrap();
            let second = script.get_source_code(target, &options).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn writer_lookup_matches_script_rendering() {
        let script = with_preamble();
        let options = RenderOptions::default();
        let writer = crossemit::writer_for_language("ts").unwrap();
        assert_eq!(
            writer.write(&script, &options).unwrap(),
            script.get_source_code(Target::TypeScript, &options).unwrap()
        );
    }

    #[test]
    fn write_to_path_matches_source_code() {
        let dir = tempfile::tempdir().unwrap();
        let script = with_preamble();
        let options = RenderOptions::default();
        for target in Target::ALL {
            let path = dir.path().join(format!("out.{}", target.extension()));
            script.write_to_path(&path, target, &options).unwrap();
            let written = std::fs::read_to_string(&path).unwrap();
            assert_eq!(written, script.get_source_code(target, &options).unwrap());
        }
    }

    #[test]
    fn pretty_is_python_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ts");
        let options = RenderOptions::default().pretty(true);
        let err = with_preamble()
            .write_to_path(&path, Target::TypeScript, &options)
            .unwrap_err();
        assert!(matches!(err, EmitError::NotYetSupported(_)));
        assert!(!path.exists());
    }

    #[test]
    fn php_declaration_needs_a_value() {
        let mut script = Script::new();
        script.also_declare("pending", CrossType::Str, None::<PanExpr>);
        assert!(matches!(
            render_err(&script, Target::Php),
            EmitError::NotSupported { .. }
        ));
        insta::assert_snapshot!(render(&script, Target::TypeScript), @"let pending: string;");
        insta::assert_snapshot!(render(&script, Target::Python), @"pending: str");
    }
}
