//! Built-in template sources
//!
//! Rendered with `trim_blocks` and `lstrip_blocks`, so block tags on their
//! own line leave no blank lines behind.

/// API controller exposing the model through the admin REST API
pub const API: &str = r"<?php

namespace {{ namespace }};

/**
 * {{ class_name }}.
 *
 * File has been created with `crudgen` {{ generator_version }}.
 */
class {{ class_name }} extends \luya\admin\ngrest\base\Api
{
    /**
     * @var string The path to the model which is the provider for the rules and fields.
     */
    public $modelClass = '{{ model_class | php_str }}';
}
";

/// Admin controller rendering the CRUD view
pub const CONTROLLER: &str = r"<?php

namespace {{ namespace }};

/**
 * {{ class_name }}.
 *
 * File has been created with `crudgen` {{ generator_version }}.
 */
class {{ class_name }} extends \luya\admin\ngrest\base\Controller
{
    /**
     * @var string The path to the model which is the provider for the rules and fields.
     */
    public $modelClass = '{{ model_class | php_str }}';
}
";

/// NgRest model bound to the database table
pub const MODEL: &str = r"<?php

namespace {{ namespace }};

use Yii;
use luya\admin\ngrest\base\NgRestModel;

/**
 * {{ class_name }}.
 *
 * File has been created with `crudgen` {{ generator_version }}.
 *
{% for property in properties %}
 * @property {{ property.column_type }} ${{ property.name }}
{% endfor %}
 */
class {{ class_name }} extends NgRestModel
{
{% if i18n and text_fields %}
    /**
     * @inheritdoc
     */
    public $i18n = [{{ text_fields | php_list }}];

{% endif %}
    /**
     * @inheritdoc
     */
    public static function tableName()
    {
        return '{{ db_table_name | php_str }}';
    }

    /**
     * @inheritdoc
     */
    public static function ngRestApiEndpoint()
    {
        return '{{ api_endpoint | php_str }}';
    }

    /**
     * @inheritdoc
     */
    public function attributeLabels()
    {
        return [
{% for label in labels %}
            '{{ label.name | php_str }}' => Yii::t('app', '{{ label.label | php_str }}'),
{% endfor %}
        ];
    }

    /**
     * @inheritdoc
     */
    public function rules()
    {
        return [
{% for rule in rules %}
            [[{{ rule.attributes | php_list }}], '{{ rule.validator }}'{% if rule.max %}, 'max' => {{ rule.max }}{% endif %}],
{% endfor %}
        ];
    }

    /**
     * @inheritdoc
     */
    public function genericSearchFields()
    {
        return [{{ text_fields | php_list }}];
    }

    /**
     * @inheritdoc
     */
    public function ngRestAttributeTypes()
    {
        return [
{% for entry in field_hints %}
            '{{ entry.name | php_str }}' => '{{ entry.hint }}',
{% endfor %}
        ];
    }

    /**
     * @inheritdoc
     */
    public function ngRestScopes()
    {
        return [
            ['list', [{{ fields | php_list }}]],
            [['create', 'update'], [{{ fields | php_list }}]],
            ['delete', false],
        ];
    }
}
";

/// Next steps printed after all files are written
pub const BUILD_SUMMARY: &str = r"Build summary

  API endpoint:      {{ api_endpoint }}
  API class:         {{ api_class_path }}
  Controller route:  {{ controller_route }}

Register the API in the admin module:

    public $apis = [
        '{{ api_endpoint | php_str }}' => '{{ api_class_path | php_str }}',
    ];

Add a menu entry in getMenu():

    ->itemApi('{{ model_title | php_str }}', '{{ controller_route | php_str }}', 'label', '{{ api_endpoint | php_str }}')
";
